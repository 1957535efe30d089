use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{app_dirs::AppDirs, session::QuizMode};

/// User preferences persisted between runs. Quiz progress is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Question counts offered for all-ions quizzes; "All" is always added.
    pub count_presets: Vec<usize>,
    /// Skip mode selection at startup.
    pub default_mode: Option<QuizMode>,
    /// Append finished quizzes to the results log.
    pub log_results: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count_presets: vec![5, 10],
            default_mode: None,
            log_results: false,
        }
    }
}

impl Config {
    /// Presets in ascending order without zeros or duplicates.
    pub fn normalized_presets(&self) -> Vec<usize> {
        let mut presets: Vec<usize> = self
            .count_presets
            .iter()
            .copied()
            .filter(|&n| n > 0)
            .collect();
        presets.sort_unstable();
        presets.dedup();
        presets
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed config");
                Config::default()
            }),
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
