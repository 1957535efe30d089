use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "ionquiz";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("ionquiz_config.json"))
    }

    /// Directory for logs and results, `$HOME/.local/state/ionquiz` when available.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            Self::project().map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn results_log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("results.csv"))
            .unwrap_or_else(|| PathBuf::from("ionquiz_results.csv"))
    }

    pub fn trace_log_path() -> PathBuf {
        Self::state_dir()
            .map(|dir| dir.join("ionquiz.log"))
            .unwrap_or_else(|| PathBuf::from("ionquiz.log"))
    }
}
