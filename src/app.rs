use std::rc::Rc;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::game::parse_guess;
use crate::language::{LanguagePack, SupportedLanguage};
use crate::manager::SessionManager;
use crate::render::{self, GameView, StatsView};
use crate::stats::{GameRecord, LifetimeTotals, StatsDb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Game,
    Stats,
    Help,
}

impl AppState {
    fn next(self) -> Self {
        match self {
            AppState::Game => AppState::Stats,
            AppState::Stats => AppState::Help,
            AppState::Help => AppState::Game,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub struct App {
    pub manager: SessionManager,
    pub state: AppState,
    pub language: SupportedLanguage,
    pub pack: LanguagePack,
    /// Shows the secret word while the round is live
    pub reveal_secret: bool,
    /// Last problem worth telling the player about
    pub message: Option<String>,
    pub stats_scroll: usize,
    stats_db: Option<Rc<StatsDb>>,
    /// Word list read from a file, used in place of the language pack's
    custom_words: Option<String>,
}

impl App {
    pub fn new(config: &Config, word_list: Option<String>, stats_db: Option<StatsDb>) -> Result<Self> {
        Self::with_manager(
            config.language,
            SessionManager::new(config),
            word_list,
            stats_db,
        )
    }

    /// Wires a manager to a language and optional stats store, then starts the first round
    pub fn with_manager(
        language: SupportedLanguage,
        mut manager: SessionManager,
        word_list: Option<String>,
        stats_db: Option<StatsDb>,
    ) -> Result<Self> {
        let pack = language.as_pack()?;
        manager.set_dictionary(dictionary_for(&pack, word_list.as_deref())?);

        let stats_db = stats_db.map(Rc::new);
        if let Some(db) = &stats_db {
            manager.add_observer(Box::new(Rc::clone(db)));
        }

        let mut app = Self {
            manager,
            state: AppState::Game,
            language,
            pack,
            reveal_secret: false,
            message: None,
            stats_scroll: 0,
            stats_db,
            custom_words: word_list,
        };
        app.new_game();
        Ok(app)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return self.quit(),
            KeyCode::Char('c') if ctrl => return self.quit(),
            KeyCode::Char('s') if ctrl => self.reveal_secret = !self.reveal_secret,
            KeyCode::Char('g') if ctrl => self.give_up(),
            KeyCode::Tab => self.state = self.state.next(),
            KeyCode::Enter | KeyCode::F(2) => {
                self.state = AppState::Game;
                self.new_game();
            }
            KeyCode::Char(c) if !ctrl => match self.state {
                AppState::Game => self.guess(c),
                AppState::Help if c == 'l' => self.switch_language(self.language.next()),
                _ => {}
            },
            KeyCode::Up if self.state == AppState::Stats => {
                self.stats_scroll = self.stats_scroll.saturating_sub(1);
            }
            KeyCode::Down if self.state == AppState::Stats => {
                // Will check max scroll in render function
                self.stats_scroll += 1;
            }
            _ => {}
        }

        KeyOutcome::Continue
    }

    pub fn new_game(&mut self) {
        self.reveal_secret = false;
        self.message = match self.manager.start_new_game() {
            Ok(_) => None,
            Err(e) => Some(e.to_string()),
        };
    }

    pub fn give_up(&mut self) {
        if self.manager.is_game_in_progress() {
            self.message = self.manager.give_up().err().map(|e| e.to_string());
        }
    }

    fn guess(&mut self, c: char) {
        let letter = match parse_guess(&c.to_string(), &self.pack.alphabet_chars()) {
            Ok(letter) => letter,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };

        let Some(game) = self.manager.current_game() else {
            return;
        };
        // letters already tried are inert, like a disabled key
        if !game.is_in_progress() || game.has_guessed(letter) {
            return;
        }

        self.message = self.manager.process_guess(letter).err().map(|e| e.to_string());
    }

    /// Loads the next language's text and dictionary.
    ///
    /// Words from a file are filtered again against the new alphabet. The live
    /// round survives only when that leaves the word set unchanged.
    pub fn switch_language(&mut self, language: SupportedLanguage) {
        let pack = match language.as_pack() {
            Ok(pack) => pack,
            Err(e) => {
                self.message = Some(e.to_string());
                return;
            }
        };

        let dictionary = match dictionary_for(&pack, self.custom_words.as_deref()) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                self.message = Some(format!("{}: {e}", pack.name));
                return;
            }
        };
        let unchanged = self
            .manager
            .dictionary()
            .is_some_and(|current| current.words() == dictionary.words());
        if !unchanged {
            self.manager.set_dictionary(dictionary);
        }

        tracing::info!(%language, "language switched");
        self.language = language;
        self.pack = pack;
        if !self.manager.is_game_in_progress() {
            self.new_game();
        }
    }

    fn quit(&mut self) -> KeyOutcome {
        self.give_up();
        KeyOutcome::Quit
    }

    pub fn game_view(&self) -> Option<GameView> {
        self.manager.current_game().map(|game| {
            render::game_view(
                game,
                self.manager.max_wrong_guesses(),
                &self.pack.alphabet_chars(),
                self.reveal_secret,
                Local::now(),
            )
        })
    }

    pub fn stats_view(&self) -> StatsView {
        let (lifetime, last_recorded) = self.stored_stats();
        render::stats_view(&self.manager, lifetime, last_recorded.as_ref())
    }

    /// Totals and newest record from the statistics store, when there is one
    fn stored_stats(&self) -> (Option<LifetimeTotals>, Option<GameRecord>) {
        let Some(db) = self.stats_db.as_ref() else {
            return (None, None);
        };

        let totals = match db.lifetime_totals() {
            Ok(totals) => Some(totals),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read lifetime totals");
                None
            }
        };
        let last = match db.recent_games(1) {
            Ok(mut records) => records.pop(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read recorded games");
                None
            }
        };

        (totals, last)
    }
}

/// The pack's own words, or a custom list cut down to the pack's alphabet
fn dictionary_for(pack: &LanguagePack, custom_words: Option<&str>) -> Result<Dictionary> {
    match custom_words {
        Some(words) => Dictionary::load(words)?.restricted_to(&pack.alphabet_chars()),
        None => pack.dictionary(),
    }
}
