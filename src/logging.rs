//! File logging for the terminal UI.
//!
//! The alternate screen owns stdout, so events go to a log file in the
//! state directory. `RUST_LOG` overrides the default `info` filter.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Installs the global subscriber writing to `path`, or to the default log
/// file when `None`. Returns the path in use, or `None` when logging is off.
pub fn init(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.or_else(AppDirs::log_path)?;
    let file = match open_log(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("gallows: logging disabled, cannot open {}: {e}", path.display());
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
