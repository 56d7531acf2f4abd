use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::{render_help, stats_screen::render_stats};

/// A UI Screen boundary: responsible for rendering and optional key handling
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
    /// Optional per-screen key handling. Returns true if the key was handled.
    fn on_key(&mut self, _key: KeyEvent, _app: &mut App) -> bool {
        false
    }
}

/// Gallows, word and letter keys
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

pub struct StatsScreen;

impl Screen for StatsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_stats(app, area, f.buffer_mut());
    }
}

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_help(app, area, f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Game => Box::new(GameScreen),
        AppState::Stats => Box::new(StatsScreen),
        AppState::Help => Box::new(HelpScreen),
    }
}
