use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::game::GameSession;
use crate::manager::GameObserver;
use chrono::{DateTime, Local};
use rusqlite::{params, types::Type, Connection};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// A finished game as stored on disk
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub secret_word: String,
    pub won: bool,
    pub guesses: usize,
    pub wrong_guesses: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Local>,
}

impl GameRecord {
    pub fn from_session(game: &GameSession) -> Self {
        Self {
            secret_word: game.secret_word(),
            won: game.is_word_found(),
            guesses: game.num_guesses(),
            wrong_guesses: game.wrong_guesses(),
            duration_ms: game.elapsed().unwrap_or_default().as_millis() as u64,
            finished_at: game.ended_at().unwrap_or_else(Local::now),
        }
    }
}

/// Totals across every recorded game, not just this play session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifetimeTotals {
    pub played: u64,
    pub wins: u64,
    pub fewest_guesses: Option<u64>,
    pub fastest_ms: Option<u64>,
}

/// SQLite store of finished games
#[derive(Debug)]
pub struct StatsDb {
    conn: Connection,
}

impl StatsDb {
    /// Opens the database in the user's state directory
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("gallows_stats.db"));
        Self::with_path(db_path)
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                secret_word TEXT NOT NULL,
                won BOOLEAN NOT NULL,
                guesses INTEGER NOT NULL,
                wrong_guesses INTEGER NOT NULL,
                duration_ms INTEGER NOT NULL,
                finished_at TEXT NOT NULL
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_finished_at ON games(finished_at)",
            [],
        )?;

        Ok(StatsDb { conn })
    }

    pub fn record_game(&self, record: &GameRecord) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO games
            (secret_word, won, guesses, wrong_guesses, duration_ms, finished_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                record.secret_word,
                record.won,
                record.guesses as i64,
                record.wrong_guesses as i64,
                record.duration_ms as i64,
                record.finished_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    pub fn lifetime_totals(&self) -> Result<LifetimeTotals> {
        let totals = self.conn.query_row(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(won), 0),
                   MIN(CASE WHEN won THEN guesses END),
                   MIN(CASE WHEN won THEN duration_ms END)
            FROM games
            "#,
            [],
            |row| {
                Ok(LifetimeTotals {
                    played: row.get::<_, i64>(0)? as u64,
                    wins: row.get::<_, i64>(1)? as u64,
                    fewest_guesses: row.get::<_, Option<i64>>(2)?.map(|v| v as u64),
                    fastest_ms: row.get::<_, Option<i64>>(3)?.map(|v| v as u64),
                })
            },
        )?;

        Ok(totals)
    }

    /// Most recently finished games first
    pub fn recent_games(&self, limit: usize) -> Result<Vec<GameRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT secret_word, won, guesses, wrong_guesses, duration_ms, finished_at
            FROM games
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            let finished_at: String = row.get(5)?;
            let finished_at = DateTime::parse_from_rfc3339(&finished_at)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?
                .with_timezone(&Local);

            Ok(GameRecord {
                secret_word: row.get(0)?,
                won: row.get(1)?,
                guesses: row.get::<_, i64>(2)? as usize,
                wrong_guesses: row.get::<_, i64>(3)? as usize,
                duration_ms: row.get::<_, i64>(4)? as u64,
                finished_at,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM games", [])?;
        Ok(())
    }
}

impl GameObserver for StatsDb {
    fn on_game_over(&mut self, game: &GameSession) {
        record_or_warn(self, game);
    }
}

/// Lets the UI keep reading totals from the same store the manager writes to
impl GameObserver for Rc<StatsDb> {
    fn on_game_over(&mut self, game: &GameSession) {
        record_or_warn(self, game);
    }
}

fn record_or_warn(db: &StatsDb, game: &GameSession) {
    if let Err(e) = db.record_game(&GameRecord::from_session(game)) {
        tracing::warn!(error = %e, "failed to record finished game");
    }
}
