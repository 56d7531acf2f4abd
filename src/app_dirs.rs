use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "gallows";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn db_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("stats.db"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("gallows.log"))
    }

    fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join(APP_NAME))
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_files_share_a_directory() {
        let (Some(db), Some(log)) = (AppDirs::db_path(), AppDirs::log_path()) else {
            return;
        };
        assert_eq!(db.parent(), log.parent());
        assert!(db.ends_with("gallows/stats.db"));
        assert!(log.ends_with("gallows/gallows.log"));
    }

    #[test]
    fn test_config_is_json() {
        if let Some(path) = AppDirs::config_path() {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        }
    }
}
