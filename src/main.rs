use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gallows::{
    config::{Config, ConfigStore, FileConfigStore},
    language::SupportedLanguage,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    stats::StatsDb,
    ui::screen::current_screen,
    App, KeyOutcome,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// hangman in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess the secret word one letter at a time before the gallows drawing is complete. Words and interface text come in several languages, and finished games are kept in a local statistics database."
)]
pub struct Cli {
    /// language for the word list and interface text
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// wrong guesses allowed before a round is lost
    #[clap(short = 'm', long)]
    max_wrong_guesses: Option<usize>,

    /// newline-delimited word list to draw secret words from
    #[clap(short = 'w', long = "words", value_name = "FILE")]
    word_file: Option<PathBuf>,

    /// do not record finished games in the statistics database
    #[clap(long)]
    no_stats: bool,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// delete every recorded game before starting
    #[clap(long)]
    reset_stats: bool,

    /// write logs here instead of the state directory
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Layers command line overrides on top of the stored settings
    fn apply(&self, mut config: Config) -> Config {
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(max) = self.max_wrong_guesses {
            config.max_wrong_guesses = max;
        }
        if self.no_stats {
            config.record_stats = false;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if let Err(e) = config.validate() {
        Cli::command().error(ErrorKind::InvalidValue, e).exit();
    }
    if cli.save_config {
        store.save(&config)?;
    }

    let word_list = match &cli.word_file {
        Some(path) => match fs::read_to_string(path) {
            Ok(words) => Some(words),
            Err(e) => Cli::command()
                .error(ErrorKind::Io, format!("{}: {e}", path.display()))
                .exit(),
        },
        None => None,
    };

    logging::init(cli.log_file.clone());
    tracing::info!(language = %config.language, max_wrong = config.max_wrong_guesses, "gallows starting");

    if cli.reset_stats {
        StatsDb::new()?.clear_all()?;
        tracing::info!("recorded games cleared");
    }

    let mut app = match App::new(&config, word_list, open_stats(&config)) {
        Ok(app) => app,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        played = app.manager.games_played(),
        wins = app.manager.wins(),
        "gallows exiting"
    );
    result
}

/// Statistics are optional; a store that cannot be opened only costs persistence
fn open_stats(config: &Config) -> Option<StatsDb> {
    if !config.record_stats {
        return None;
    }
    match StatsDb::new() {
        Ok(db) => Some(db),
        Err(e) => {
            tracing::warn!(error = %e, "statistics disabled");
            None
        }
    }
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Key(key) => {
                if app.handle_key(key) == KeyOutcome::Quit {
                    break;
                }
            }
            // redraw keeps the round timer moving
            GameEvent::Resize | GameEvent::Tick => {}
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use gallows::manager::SessionManager;
    use gallows::AppState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["gallows"]);

        assert_eq!(cli.language, None);
        assert_eq!(cli.max_wrong_guesses, None);
        assert_eq!(cli.word_file, None);
        assert!(!cli.no_stats);
        assert!(!cli.save_config);
        assert!(!cli.reset_stats);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_language() {
        let cli = Cli::parse_from(["gallows", "-l", "spanish"]);
        assert_eq!(cli.language, Some(SupportedLanguage::Spanish));

        let cli = Cli::parse_from(["gallows", "--language", "english"]);
        assert_eq!(cli.language, Some(SupportedLanguage::English));
    }

    #[test]
    fn test_cli_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["gallows", "-l", "klingon"]).is_err());
    }

    #[test]
    fn test_cli_max_wrong_guesses() {
        let cli = Cli::parse_from(["gallows", "-m", "8"]);
        assert_eq!(cli.max_wrong_guesses, Some(8));

        let cli = Cli::parse_from(["gallows", "--max-wrong-guesses", "3"]);
        assert_eq!(cli.max_wrong_guesses, Some(3));
    }

    #[test]
    fn test_cli_word_file() {
        let cli = Cli::parse_from(["gallows", "-w", "words.txt"]);
        assert_eq!(cli.word_file, Some(PathBuf::from("words.txt")));

        let cli = Cli::parse_from(["gallows", "--words", "/tmp/list"]);
        assert_eq!(cli.word_file, Some(PathBuf::from("/tmp/list")));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["gallows", "--no-stats", "--save-config", "--log-file", "x.log"]);
        assert!(cli.no_stats);
        assert!(cli.save_config);
        assert_eq!(cli.log_file, Some(PathBuf::from("x.log")));

        let cli = Cli::parse_from(["gallows", "--reset-stats"]);
        assert!(cli.reset_stats);
    }

    #[test]
    fn test_apply_keeps_stored_settings_without_overrides() {
        let stored = Config {
            language: SupportedLanguage::Spanish,
            max_wrong_guesses: 9,
            record_stats: true,
        };

        let cli = Cli::parse_from(["gallows"]);
        assert_eq!(cli.apply(stored.clone()), stored);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["gallows", "-l", "spanish", "-m", "4", "--no-stats"]);

        let config = cli.apply(Config::default());

        assert_eq!(config.language, SupportedLanguage::Spanish);
        assert_eq!(config.max_wrong_guesses, 4);
        assert!(!config.record_stats);
    }

    #[test]
    fn test_apply_zero_max_fails_validation() {
        let cli = Cli::parse_from(["gallows", "-m", "0"]);
        assert!(cli.apply(Config::default()).validate().is_err());
    }

    #[test]
    fn test_open_stats_respects_config() {
        let config = Config {
            record_stats: false,
            ..Config::default()
        };
        assert!(open_stats(&config).is_none());
    }

    #[test]
    fn test_ui_draws_every_screen() {
        let manager = SessionManager::with_rng(&Config::default(), StdRng::seed_from_u64(5));
        let mut app = App::with_manager(
            SupportedLanguage::English,
            manager,
            Some("crane".into()),
            None,
        )
        .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        for state in [AppState::Game, AppState::Stats, AppState::Help] {
            app.state = state;
            terminal.draw(|f| ui(&mut app, f)).unwrap();
        }

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("How to play"));
    }
}
