//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "dashboard";
const APPLICATION: &str = "dashboard";

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for persistent application data.
///
/// - Linux: `$XDG_DATA_HOME/dashboard` or `~/.local/share/dashboard`
/// - macOS: `~/Library/Application Support/dev.dashboard.dashboard`
/// - Windows: `C:\Users\<User>\AppData\Roaming\dashboard\dashboard\data`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for logs and other regenerable files.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default configuration file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// SQLite database holding layouts and preferences.
pub fn settings_db() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("settings.db"))
}

pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// A log file that could not be archived or removed.
#[derive(Debug)]
pub struct LogFileError {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Archive the previous run's log under a timestamped name and prune old
/// archives.
///
/// Call at startup before creating the new log file. The logger is not
/// running yet, so failures are returned for the caller to report.
pub fn rotate_logs() -> Vec<LogFileError> {
    let Some(cache) = cache_dir() else {
        return Vec::new();
    };
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    rotate_logs_in(&cache, &timestamp, MAX_OLD_LOGS)
}

fn rotate_logs_in(dir: &Path, timestamp: &str, keep: usize) -> Vec<LogFileError> {
    let mut failures = Vec::new();
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let archived = dir.join(format!("{}.log", timestamp));
        if let Err(error) = fs::rename(&latest, &archived) {
            failures.push(LogFileError { path: latest, error });
        }
    }

    failures.extend(prune_logs(dir, keep));
    failures
}

/// Remove the oldest archived logs in `dir` beyond `keep`.
fn prune_logs(dir: &Path, keep: usize) -> Vec<LogFileError> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    let excess = logs.len().saturating_sub(keep);
    logs.iter()
        .take(excess)
        .filter_map(|entry| {
            let path = entry.path();
            fs::remove_file(&path)
                .err()
                .map(|error| LogFileError { path, error })
        })
        .collect()
}
