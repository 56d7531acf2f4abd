//! Plain data describing what the screens show.
//!
//! Everything here is computed from engine state alone so the widgets in
//! `ui` only translate it into terminal cells.

use crate::game::{format_duration, GameSession, Outcome, PLACEHOLDER};
use crate::manager::SessionManager;
use crate::stats::{GameRecord, LifetimeTotals};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Number of drawings of the gallows after the empty one
pub const STAGES: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    Unused,
    Hit,
    Miss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterKey {
    pub letter: char,
    pub state: KeyState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessLine {
    pub letter: char,
    pub correct: bool,
    /// The revealed pattern right after this guess
    pub pattern: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Banner {
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    /// Revealed pattern with a space between letters
    pub pattern: String,
    pub keys: Vec<LetterKey>,
    pub guesses: Vec<GuessLine>,
    pub wrong: usize,
    pub max_wrong: usize,
    pub stage: usize,
    pub banner: Option<Banner>,
    /// Only present once the round is over or when explicitly revealed
    pub secret: Option<String>,
    pub elapsed: String,
}

/// Maps the wrong-guess count onto the fixed set of drawings
pub fn stage_for(wrong: usize, max_wrong: usize) -> usize {
    if max_wrong == 0 {
        return STAGES;
    }
    (wrong * STAGES / max_wrong).min(STAGES)
}

pub fn game_view(
    game: &GameSession,
    max_wrong: usize,
    alphabet: &[char],
    reveal: bool,
    now: DateTime<Local>,
) -> GameView {
    let secret = game.secret_word();

    let keys = alphabet
        .iter()
        .map(|&letter| {
            let state = match (game.has_guessed(letter), game.is_correct_guess(letter)) {
                (false, _) => KeyState::Unused,
                (true, true) => KeyState::Hit,
                (true, false) => KeyState::Miss,
            };
            LetterKey { letter, state }
        })
        .collect();

    let mut revealed: Vec<char> = vec![PLACEHOLDER; secret.chars().count()];
    let guesses = game
        .guesses()
        .iter()
        .map(|&letter| {
            for (slot, c) in revealed.iter_mut().zip(secret.chars()) {
                if c == letter {
                    *slot = c;
                }
            }
            GuessLine {
                letter,
                correct: game.is_correct_guess(letter),
                pattern: revealed.iter().collect(),
            }
        })
        .collect();

    let banner = match game.outcome() {
        Outcome::InProgress => None,
        Outcome::Won => Some(Banner::Won),
        Outcome::Lost => Some(Banner::Lost),
    };

    let elapsed = game
        .elapsed()
        .unwrap_or_else(|| (now - game.started_at()).to_std().unwrap_or_default());

    GameView {
        pattern: spaced(&game.pattern()),
        keys,
        guesses,
        wrong: game.wrong_guesses(),
        max_wrong,
        stage: stage_for(game.wrong_guesses(), max_wrong),
        banner,
        secret: (reveal || banner.is_some()).then_some(secret),
        elapsed: format_duration(elapsed),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultLine {
    pub summary: String,
    pub won: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsView {
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    pub fewest_guesses_win: Option<String>,
    pub fastest_win: Option<String>,
    /// Finished rounds, oldest first
    pub results: Vec<ResultLine>,
    pub lifetime: Option<LifetimeTotals>,
    /// Newest game in the statistics store, possibly from an earlier run
    pub last_recorded: Option<ResultLine>,
}

pub fn stats_view(
    manager: &SessionManager,
    lifetime: Option<LifetimeTotals>,
    last_recorded: Option<&GameRecord>,
) -> StatsView {
    StatsView {
        games_played: manager.games_played(),
        wins: manager.wins(),
        losses: manager.losses(),
        fewest_guesses_win: manager.fewest_guesses_win().map(GameSession::summary),
        fastest_win: manager.fastest_win().map(GameSession::summary),
        results: manager
            .history()
            .iter()
            .map(|game| ResultLine {
                summary: game.summary(),
                won: game.is_word_found(),
            })
            .collect(),
        lifetime,
        last_recorded: last_recorded.map(recorded_line),
    }
}

fn recorded_line(record: &GameRecord) -> ResultLine {
    ResultLine {
        summary: format!(
            "{} ({}) {}",
            record.secret_word,
            format_duration(Duration::from_millis(record.duration_ms)),
            record.finished_at.format("%Y-%m-%d %H:%M"),
        ),
        won: record.won,
    }
}

fn spaced(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for (i, c) in pattern.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
