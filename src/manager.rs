use crate::config::Config;
use crate::dictionary::{self, Dictionary};
use crate::error::{GameError, Result};
use crate::game::GameSession;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Coarse state of play, mirrored from the current session for the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Over,
}

/// Hooks for collaborators that follow the game, such as a display or a stats store.
///
/// All methods default to doing nothing.
pub trait GameObserver {
    fn on_new_game(&mut self, _game: &GameSession) {}

    fn on_guess(&mut self, _game: &GameSession, _letter: char, _correct: bool) {}

    /// Called once per session, when it is archived into the history
    fn on_game_over(&mut self, _game: &GameSession) {}
}

/// Owns the dictionary, the round being played and every finished round
pub struct SessionManager {
    dictionary: Option<Dictionary>,
    current: Option<GameSession>,
    history: Vec<GameSession>,
    state: GameState,
    max_wrong_guesses: usize,
    rng: StdRng,
    observers: Vec<Box<dyn GameObserver>>,
}

impl SessionManager {
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &Config, rng: StdRng) -> Self {
        Self {
            dictionary: None,
            current: None,
            history: vec![],
            state: GameState::NotStarted,
            max_wrong_guesses: config.max_wrong_guesses.max(1),
            rng,
            observers: vec![],
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Parses a newline-delimited word list and makes it the active dictionary.
    ///
    /// On failure the previous dictionary stays in place.
    pub fn load_dictionary(&mut self, raw_word_list: &str) -> Result<()> {
        let dictionary = Dictionary::load(raw_word_list)?;
        self.set_dictionary(dictionary);
        Ok(())
    }

    /// Swaps the active dictionary. A live round is given up and archived first,
    /// leaving the manager waiting for a new game.
    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        info!(
            words = dictionary.len(),
            candidates = dictionary.candidates().len(),
            "dictionary loaded"
        );
        self.retire_current();
        self.current = None;
        self.state = GameState::NotStarted;
        self.dictionary = Some(dictionary);
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    pub fn has_repeating_letters(word: &str) -> bool {
        dictionary::has_repeating_letters(word)
    }

    /// Archives the previous round, if any, then starts a round with a fresh secret word
    pub fn start_new_game(&mut self) -> Result<&GameSession> {
        let secret = self
            .dictionary
            .as_ref()
            .ok_or(GameError::NoDictionary)?
            .choose_secret(&mut self.rng)
            .ok_or(GameError::NoCandidateWords)?
            .to_string();

        self.retire_current();

        let game = GameSession::new(&secret);
        info!(letters = game.secret_word().chars().count(), "new game");
        debug!(secret = %secret, "secret word chosen");
        for observer in self.observers.iter_mut() {
            observer.on_new_game(&game);
        }

        self.state = GameState::InProgress;
        let game: &GameSession = self.current.insert(game);
        Ok(game)
    }

    /// Applies a guess to the current round and returns the revealed pattern.
    ///
    /// Guesses on a finished round change nothing and return its final pattern.
    pub fn process_guess(&mut self, letter: char) -> Result<String> {
        if !letter.is_alphabetic() {
            return Err(GameError::InvalidGuess(letter.to_string()));
        }

        let max_wrong = self.max_wrong_guesses;
        let game = self.current.as_mut().ok_or(GameError::NoGameInProgress)?;
        if !game.is_in_progress() {
            return Ok(game.pattern());
        }

        let correct = game.is_correct_guess(letter);
        let pattern = game.guess(letter);
        if game.is_in_progress() && game.wrong_guesses() >= max_wrong {
            game.give_up();
        }
        debug!(%letter, correct, wrong = game.wrong_guesses(), "guess processed");

        for observer in self.observers.iter_mut() {
            observer.on_guess(&*game, letter, correct);
        }

        if !game.is_in_progress() {
            self.state = GameState::Over;
            self.archive_current();
        }

        Ok(pattern)
    }

    /// Abandons the current round, counting it as a loss
    pub fn give_up(&mut self) -> Result<()> {
        let game = self.current.as_mut().ok_or(GameError::NoGameInProgress)?;
        if !game.is_in_progress() {
            return Err(GameError::NoGameInProgress);
        }

        game.give_up();
        self.state = GameState::Over;
        self.archive_current();
        Ok(())
    }

    pub fn current_game(&self) -> Option<&GameSession> {
        self.current.as_ref()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_not_started(&self) -> bool {
        self.state == GameState::NotStarted
    }

    pub fn is_game_in_progress(&self) -> bool {
        self.state == GameState::InProgress
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::Over
    }

    pub fn max_wrong_guesses(&self) -> usize {
        self.max_wrong_guesses
    }

    /// Finished rounds in completion order
    pub fn history(&self) -> &[GameSession] {
        &self.history
    }

    pub fn games_played(&self) -> usize {
        self.history.len()
    }

    pub fn wins(&self) -> usize {
        self.history.iter().filter(|g| g.is_word_found()).count()
    }

    pub fn losses(&self) -> usize {
        self.history.iter().filter(|g| !g.is_word_found()).count()
    }

    /// The earliest won round with the fewest guesses
    pub fn fewest_guesses_win(&self) -> Option<&GameSession> {
        self.history
            .iter()
            .filter(|g| g.is_word_found())
            .min_by_key(|g| g.num_guesses())
    }

    /// The earliest won round with the shortest play time
    pub fn fastest_win(&self) -> Option<&GameSession> {
        self.history
            .iter()
            .filter(|g| g.is_word_found())
            .min_by_key(|g| g.elapsed())
    }

    fn retire_current(&mut self) {
        if let Some(game) = self.current.as_mut() {
            if game.is_in_progress() {
                info!("abandoning live game");
                game.give_up();
            }
        }
        self.archive_current();
    }

    /// Appends the current round to the history at most once, and only once it is finished
    fn archive_current(&mut self) {
        let Some(game) = self.current.as_mut() else {
            return;
        };
        if game.archived || game.is_in_progress() {
            return;
        }

        game.archived = true;
        info!(
            won = game.is_word_found(),
            guesses = game.num_guesses(),
            wrong = game.wrong_guesses(),
            "game over"
        );
        self.history.push(game.clone());
        for observer in self.observers.iter_mut() {
            observer.on_game_over(&*game);
        }
    }
}
