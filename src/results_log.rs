use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::{
    app_dirs::AppDirs,
    session::{CompletionReport, QuizMode},
};

/// One finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub date: DateTime<Local>,
    pub mode: QuizMode,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
}

impl ResultRow {
    pub fn new(mode: QuizMode, report: &CompletionReport, date: DateTime<Local>) -> Self {
        Self {
            date,
            mode,
            score: report.final_score,
            total: report.total_questions,
            percentage: (report.percentage * 10.0).round() / 10.0,
        }
    }
}

/// Append-only CSV of completed quizzes.
#[derive(Debug, Clone)]
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::with_path(AppDirs::results_log_path())
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, row: &ResultRow) -> Result<(), csv::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // A new or empty file needs the header row
        let needs_header = fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_all(&self) -> Result<Vec<ResultRow>, csv::Error> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        csv::Reader::from_path(&self.path)?
            .deserialize()
            .collect()
    }
}

impl Default for ResultsLog {
    fn default() -> Self {
        Self::new()
    }
}
