//! Report sources.
//!
//! A source hands the application telemetry reports. The application keeps
//! at most one report; every report a source yields replaces the previous
//! one outright.

mod file;

pub use file::{load_report_file, FileSource};

use std::fmt::Debug;

use crate::data::TelemetryReport;

/// Trait for receiving telemetry reports.
///
/// # Example
///
/// ```no_run
/// use tensix_ghost::{FileSource, ReportSource};
///
/// let (mut source, report) = FileSource::open("sample-report.json")?;
/// println!("{} ops", report.timeline.len());
/// if let Some(updated) = source.poll() {
///     println!("file rewritten: {} ops", updated.timeline.len());
/// }
/// # Ok::<(), tensix_ghost::LoadError>(())
/// ```
pub trait ReportSource: Send + Debug {
    /// Return a new report if one is available. Non-blocking.
    fn poll(&mut self) -> Option<TelemetryReport>;

    /// Human-readable description for the status bar.
    fn description(&self) -> &str;

    /// Message from the most recent failed poll, cleared by a successful one.
    fn error(&self) -> Option<&str>;
}
