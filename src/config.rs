//! Resolved run settings.
//!
//! Values come from CLI flags, which fall back to environment variables
//! (a `.env` file is loaded first by the binary).

use std::path::PathBuf;

use crate::labels::WeekdayOrigin;

/// Cleaned hourly Capital Bikeshare dataset.
pub const DEFAULT_SOURCE: &str = "https://github.com/andhikaprimaditama22/Dicoding-Capital-Bike-Sharing-Analysis/raw/refs/heads/main/dashboard/hour_clean.csv";

pub const DEFAULT_LOG_FILE: &str = "logs/bikeshare_dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path or URL of the dataset.
    pub source: String,
    pub weekday_origin: WeekdayOrigin,
    pub cache_capacity: usize,
}

/// Where the JSON log file goes and how verbose each sink is by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub file_path: PathBuf,
    pub stderr_level: &'static str,
    pub json_level: &'static str,
}

impl LogSettings {
    /// Reads `LOG_FILE_PATH`, defaulting to [`DEFAULT_LOG_FILE`].
    pub fn from_env() -> Self {
        let file_path =
            std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Self::with_file(file_path)
    }

    pub fn with_file(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            stderr_level: "info",
            json_level: "debug",
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        match self.file_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("logs"),
        }
    }

    pub fn log_file_name(&self) -> PathBuf {
        self.file_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("bikeshare_dashboard.log"))
    }
}
