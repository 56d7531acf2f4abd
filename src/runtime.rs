//! Terminal input for the game loop.
//!
//! A reader thread turns crossterm events into [`GameEvent`]s. The main loop
//! pulls one per [`Runner::step`], getting a `Tick` when the player is idle so
//! the round clock keeps redrawing.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the game loop reacts to
#[derive(Clone, Debug)]
pub enum GameEvent {
    /// A key press: a guess, a command, or nothing the app cares about
    Key(KeyEvent),
    Resize,
    /// No input within the tick interval
    Tick,
}

/// Maps a terminal event to a game event, or `None` for input the game ignores.
///
/// Some terminals report key releases as well as presses. Only the press
/// counts, otherwise every letter would be guessed twice.
pub fn translate(event: CtEvent) -> Option<GameEvent> {
    match event {
        CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(GameEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(GameEvent::Resize),
        _ => None,
    }
}

/// Where the game loop waits for input
pub trait EventSource: Send + 'static {
    /// Waits up to `timeout` for the next event, failing with `Timeout` when
    /// none arrives.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;
}

/// Reads the real terminal on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(evt) => evt,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal input closed");
                    break;
                }
            };
            let Some(evt) = translate(evt) else {
                continue;
            };
            // the game loop has exited
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// How long the loop waits for input before redrawing the round clock
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Scripted input: whatever is sent on the channel is what the player "types"
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the game loop one event at a time
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to one tick interval for input. Returns `Tick` when none
    /// arrives, and also once the input thread is gone.
    pub fn step(&self) -> GameEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => GameEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseEvent, MouseEventKind};

    fn letter(c: char, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn runner(rx: Receiver<GameEvent>, tick_ms: u64) -> Runner<TestEventSource, FixedTicker> {
        Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(tick_ms)),
        )
    }

    #[test]
    fn test_translate_letter_press() {
        let event = translate(CtEvent::Key(letter('e', KeyEventKind::Press)));

        assert!(matches!(event, Some(GameEvent::Key(key)) if key.code == KeyCode::Char('e')));
    }

    #[test]
    fn test_translate_drops_key_release() {
        // a press and release of one key is a single guess
        assert!(translate(CtEvent::Key(letter('e', KeyEventKind::Release))).is_none());
        assert!(translate(CtEvent::Key(letter('e', KeyEventKind::Repeat))).is_some());
    }

    #[test]
    fn test_translate_resize_and_ignored_input() {
        assert!(matches!(translate(CtEvent::Resize(80, 24)), Some(GameEvent::Resize)));
        assert!(translate(CtEvent::FocusGained).is_none());
        assert!(translate(CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }))
        .is_none());
    }

    #[test]
    fn test_idle_player_gets_ticks() {
        let (_tx, rx) = mpsc::channel();
        let runner = runner(rx, 1);

        assert!(matches!(runner.step(), GameEvent::Tick));
        assert!(matches!(runner.step(), GameEvent::Tick));
    }

    #[test]
    fn test_typed_guesses_arrive_in_order() {
        let (tx, rx) = mpsc::channel();
        for c in "crane".chars() {
            tx.send(GameEvent::Key(letter(c, KeyEventKind::Press))).unwrap();
        }
        tx.send(GameEvent::Resize).unwrap();
        let runner = runner(rx, 10);

        let typed: String = (0..5)
            .map(|_| match runner.step() {
                GameEvent::Key(KeyEvent {
                    code: KeyCode::Char(c),
                    ..
                }) => c,
                other => panic!("expected a letter, got {other:?}"),
            })
            .collect();

        assert_eq!(typed, "crane");
        assert!(matches!(runner.step(), GameEvent::Resize));
        assert!(matches!(runner.step(), GameEvent::Tick));
    }

    #[test]
    fn test_closed_input_still_ticks() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        drop(tx);
        let runner = runner(rx, 1);

        assert!(matches!(runner.step(), GameEvent::Tick));
    }
}
