//! Error types shared by the engine, the language packs and the stats store.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// The word list contained no usable words
    #[error("dictionary is empty")]
    EmptyDictionary,

    /// Every word in the list repeats a letter, so no secret word can be drawn
    #[error("dictionary has no words without repeating letters")]
    NoCandidateWords,

    /// A game was requested before any dictionary was loaded
    #[error("no dictionary loaded")]
    NoDictionary,

    #[error("no game in progress")]
    NoGameInProgress,

    /// Rejected at the input boundary before reaching the session
    #[error("invalid guess: {0:?}")]
    InvalidGuess(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
