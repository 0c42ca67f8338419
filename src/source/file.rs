//! File-based report source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::ReportSource;
use crate::data::{validate, TelemetryReport};
use crate::error::LoadError;

/// Load and validate a report file.
///
/// The name must end in `.json`; this is checked before the file is read.
/// JSON syntax errors and schema violations are distinct error kinds.
pub fn load_report_file(path: &Path) -> Result<TelemetryReport, LoadError> {
    let is_json = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".json"));
    if !is_json {
        return Err(LoadError::NotJson { path: path.to_path_buf() });
    }

    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    Ok(validate(value)?)
}

/// A report file that is re-read whenever its modification time advances.
///
/// A rewrite that fails to load is reported through [`ReportSource::error`]
/// and yields nothing, so the caller keeps its current report.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
}

impl FileSource {
    /// Load `path` once and start watching it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, TelemetryReport), LoadError> {
        let path = path.as_ref().to_path_buf();
        let last_modified = modified_time(&path);
        let report = load_report_file(&path)?;
        let description = format!("file: {}", path.display());
        let source = Self {
            path,
            description,
            last_error: None,
            last_modified,
        };
        Ok((source, report))
    }

    /// Returns the path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

impl ReportSource for FileSource {
    fn poll(&mut self) -> Option<TelemetryReport> {
        let current_modified = modified_time(&self.path);

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, Some(_)) => true,
            (Some(last), Some(current)) => current > last,
            // File disappeared: keep what we have
            (_, None) => false,
        };
        if !file_changed {
            return None;
        }

        // Record the new mtime even on failure so a broken file is
        // reported once rather than re-parsed every poll.
        self.last_modified = current_modified;
        match load_report_file(&self.path) {
            Ok(report) => {
                debug!(path = %self.path.display(), ops = report.timeline.len(), "report file changed");
                self.last_error = None;
                Some(report)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring invalid report rewrite");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
