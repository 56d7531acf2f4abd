// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds argument parsing and terminal setup.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod language;
pub mod logging;
pub mod manager;
pub mod render;
pub mod runtime;
pub mod stats;
pub mod ui;

pub use app::{App, AppState, KeyOutcome};
pub use error::{GameError, Result};
pub use game::{GameSession, Outcome};
pub use manager::{GameObserver, GameState, SessionManager};
