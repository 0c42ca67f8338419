//! Application state and user interaction logic.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::data::{
    mock_timeline, Control, GridMask, HealthState, Operation, Playback, Simulation,
    TelemetryReport, Vitals,
};
use crate::error::LoadError;
use crate::settings::Settings;
use crate::source::{FileSource, ReportSource};
use crate::ui::Theme;

/// Default target of the in-app export key.
pub const EXPORT_FILE: &str = "ghost_export.json";

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// The current view/tab in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The device: core grid, Ghost and current operation.
    Device,
    /// Simulation sliders, data source and health mode.
    Controls,
    /// The loaded report and its operation timeline.
    Report,
}

impl View {
    pub const ALL: [View; 3] = [View::Device, View::Controls, View::Report];

    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Device => View::Controls,
            View::Controls => View::Report,
            View::Report => View::Device,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Device => View::Report,
            View::Controls => View::Device,
            View::Report => View::Controls,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Device => "Device",
            View::Controls => "Controls",
            View::Report => "Report",
        }
    }
}

/// A modal drawn on top of the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    About,
    Lexicon,
    Thresholds,
}

/// Where the active vitals and timeline come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Simulation,
    Loaded,
}

impl DataSource {
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Simulation => "Simulation",
            DataSource::Loaded => "Loaded Data",
        }
    }
}

/// Whether the displayed health is computed or picked by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthMode {
    Auto,
    Manual,
}

/// Main application state.
///
/// The event loop owns the only mutable handle; rendering borrows it.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub overlay: Option<Overlay>,

    // Simulation
    pub simulation: Simulation,
    pub selected_control: Control,
    default_simulation: Simulation,
    fallback_utilization: f64,

    // Loaded report
    pub data_source: DataSource,
    report: Option<TelemetryReport>,
    source: Option<Box<dyn ReportSource>>,
    report_path: Option<PathBuf>,
    pub load_error: Option<String>,

    // Playback
    pub playback: Playback,
    mock_timeline: Vec<Operation>,

    // Health
    pub health_mode: HealthMode,
    pub manual_health: HealthState,

    // Device
    pub show_ghost: bool,

    // Path prompt for opening a report
    pub path_input: String,
    pub path_input_active: bool,

    // UI
    pub theme: Theme,
    started: Instant,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App from resolved settings, in simulation mode.
    pub fn new(settings: &Settings) -> Result<Self> {
        let tick = settings.tick_period()?;
        Ok(Self {
            running: true,
            current_view: View::Device,
            overlay: None,
            simulation: settings.simulation.clone(),
            selected_control: Control::Temperature,
            default_simulation: settings.simulation.clone(),
            fallback_utilization: settings.fallback_utilization,
            data_source: DataSource::Simulation,
            report: None,
            source: None,
            report_path: None,
            load_error: None,
            playback: Playback::new(tick),
            mock_timeline: mock_timeline(),
            health_mode: HealthMode::Auto,
            manual_health: HealthState::Healthy,
            show_ghost: true,
            path_input: String::new(),
            path_input_active: false,
            theme: Theme::for_choice(settings.theme),
            started: Instant::now(),
            status_message: None,
        })
    }

    /// Returns a description of the active data source.
    pub fn source_description(&self) -> &str {
        match (self.data_source, &self.source) {
            (DataSource::Loaded, Some(source)) => source.description(),
            (DataSource::Loaded, None) => "loaded report",
            (DataSource::Simulation, _) => "simulation",
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// The loaded report, if any, regardless of the active source.
    pub fn report(&self) -> Option<&TelemetryReport> {
        self.report.as_ref()
    }

    fn active_report(&self) -> Option<&TelemetryReport> {
        match self.data_source {
            DataSource::Loaded => self.report.as_ref(),
            DataSource::Simulation => None,
        }
    }

    /// Vitals of the active data source.
    pub fn vitals(&self) -> Vitals {
        match self.active_report() {
            Some(report) => Vitals::from_report(report, self.fallback_utilization),
            None => Vitals::from_simulation(&self.simulation),
        }
    }

    /// Timeline of the active data source.
    pub fn timeline(&self) -> &[Operation] {
        match self.active_report() {
            Some(report) => &report.timeline,
            None => &self.mock_timeline,
        }
    }

    /// Index of the current operation within [`App::timeline`].
    pub fn current_index(&self) -> usize {
        self.playback.resolve(self.timeline().len())
    }

    /// The operation currently shown on the grid.
    pub fn current_operation(&self) -> Option<&Operation> {
        self.timeline().get(self.current_index())
    }

    /// Health computed from the active vitals.
    pub fn computed_health(&self) -> HealthState {
        self.vitals().health()
    }

    /// Health shown by the Ghost: computed, or the manual pick.
    pub fn health(&self) -> HealthState {
        match self.health_mode {
            HealthMode::Auto => self.computed_health(),
            HealthMode::Manual => self.manual_health,
        }
    }

    /// Cores light up only while the timeline is playing.
    pub fn is_computing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Active cells for the current frame.
    pub fn grid_mask(&self) -> GridMask {
        match self.current_operation() {
            Some(op) if self.is_computing() => GridMask::device(op),
            _ => GridMask::empty(crate::data::GRID_ROWS, crate::data::GRID_COLS),
        }
    }

    /// When the app was created; the animation clock.
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Load a report file and make it the active source.
    ///
    /// On failure the previous report and source selection are untouched
    /// and the error is kept for display.
    pub fn open_report(&mut self, path: &Path) -> Result<(), LoadError> {
        match FileSource::open(path) {
            Ok((source, report)) => {
                info!(
                    path = %path.display(),
                    ops = report.timeline.len(),
                    chip = %report.device_info.chip,
                    "report loaded"
                );
                self.set_report(report, Box::new(source));
                self.report_path = Some(path.to_path_buf());
                Ok(())
            }
            Err(e) => {
                if e.is_rejected_by_name() {
                    debug!(path = %path.display(), "not a .json file");
                } else {
                    warn!(path = %path.display(), error = %e, "report rejected");
                }
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the loaded report and switch to it.
    ///
    /// The previous report is discarded. Playback restarts paused at the
    /// first operation.
    pub fn set_report(&mut self, report: TelemetryReport, source: Box<dyn ReportSource>) {
        self.report = Some(report);
        self.source = Some(source);
        self.report_path = None;
        self.data_source = DataSource::Loaded;
        self.load_error = None;
        self.playback.reset();
    }

    /// Re-read the current report file, if any.
    pub fn reload_report(&mut self) -> Result<(), LoadError> {
        let Some(path) = self.report_path.clone() else {
            self.set_status_message("No report file to reload".to_string());
            return Ok(());
        };
        self.open_report(&path)
    }

    /// Path of the loaded report file, if it came from one.
    pub fn report_path(&self) -> Option<&Path> {
        self.report_path.as_deref()
    }

    /// Poll the report source for a rewritten file.
    ///
    /// Returns true if a new report replaced the current one.
    pub fn poll_source(&mut self) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        if let Some(report) = source.poll() {
            info!(ops = report.timeline.len(), "report replaced from source");
            self.report = Some(report);
            self.load_error = None;
            // The selector stays put; only a visible timeline restarts
            if self.data_source == DataSource::Loaded {
                self.playback.reset();
            }
            return true;
        }
        if let Some(err) = source.error() {
            self.load_error = Some(err.to_string());
        }
        false
    }

    /// Advance playback for the time elapsed.
    pub fn tick(&mut self, now: Instant) {
        let len = self.timeline().len();
        let steps = self.playback.advance(now, len);
        if steps > 0 {
            debug!(index = self.playback.index(), steps, "playback advanced");
        }
    }

    /// Start or pause the timeline.
    pub fn toggle_play(&mut self, now: Instant) {
        // Normalize a stale index before resuming on a shorter timeline
        if self.playback.index() >= self.timeline().len() {
            self.playback.reset();
        }
        self.playback.toggle(now);
        debug!(playing = self.playback.is_playing(), "playback toggled");
    }

    /// Step to the next operation, wrapping at the end.
    pub fn step_operation(&mut self) {
        let len = self.timeline().len();
        self.playback.step(len);
    }

    /// Restore simulation defaults and discard any loaded report.
    pub fn restart(&mut self) {
        self.simulation = self.default_simulation.clone();
        self.playback.reset();
        self.health_mode = HealthMode::Auto;
        self.data_source = DataSource::Simulation;
        self.report = None;
        self.source = None;
        self.report_path = None;
        self.load_error = None;
        info!("restarted with simulation defaults");
    }

    /// Switch the data source. Loaded is only available with a report.
    pub fn select_source(&mut self, source: DataSource) {
        if source == DataSource::Loaded && self.report.is_none() {
            self.set_status_message("No report loaded (press o to open one)".to_string());
            return;
        }
        if self.data_source != source {
            info!(source = source.label(), "data source switched");
        }
        self.data_source = source;
    }

    /// Flip between simulation and loaded data.
    pub fn toggle_source(&mut self) {
        let next = match self.data_source {
            DataSource::Simulation => DataSource::Loaded,
            DataSource::Loaded => DataSource::Simulation,
        };
        self.select_source(next);
    }

    /// Flip between computed and manual health.
    pub fn toggle_health_mode(&mut self) {
        self.health_mode = match self.health_mode {
            HealthMode::Auto => HealthMode::Manual,
            HealthMode::Manual => HealthMode::Auto,
        };
    }

    /// Step the manual health pick; switches to manual mode.
    pub fn cycle_manual_health(&mut self, forward: bool) {
        if self.health_mode == HealthMode::Auto {
            self.health_mode = HealthMode::Manual;
            return;
        }
        self.manual_health = if forward {
            self.manual_health.next()
        } else {
            self.manual_health.prev()
        };
    }

    /// Toggle between the Ghost and grid-only device views.
    pub fn toggle_ghost(&mut self) {
        self.show_ghost = !self.show_ghost;
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move the slider selection down.
    pub fn select_next_control(&mut self) {
        self.selected_control = self.selected_control.next();
    }

    /// Move the slider selection up.
    pub fn select_prev_control(&mut self) {
        self.selected_control = self.selected_control.prev();
    }

    /// Move the selected slider. Sliders only drive the simulation source.
    pub fn nudge_control(&mut self, steps: i32) {
        if self.data_source != DataSource::Simulation {
            self.set_status_message(
                "Sliders drive the simulation; press s to switch source".to_string(),
            );
            return;
        }
        self.simulation.nudge(self.selected_control, steps);
    }

    /// Show an overlay, or hide it if it is already shown.
    pub fn toggle_overlay(&mut self, overlay: Overlay) {
        self.overlay = if self.overlay == Some(overlay) {
            None
        } else {
            Some(overlay)
        };
    }

    /// Close any overlay.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Begin typing a report path.
    pub fn start_path_input(&mut self) {
        self.path_input_active = true;
    }

    /// Leave the path prompt, keeping what was typed.
    pub fn cancel_path_input(&mut self) {
        self.path_input_active = false;
    }

    pub fn path_push(&mut self, c: char) {
        self.path_input.push(c);
    }

    pub fn path_pop(&mut self) {
        self.path_input.pop();
    }

    /// Open the typed path.
    pub fn submit_path_input(&mut self) {
        self.path_input_active = false;
        let typed = self.path_input.trim().to_string();
        if typed.is_empty() {
            return;
        }
        let path = PathBuf::from(typed);
        if self.open_report(&path).is_ok() {
            self.set_status_message(format!("Loaded {}", path.display()));
            self.path_input.clear();
        }
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// JSON description of the current state.
    pub fn snapshot(&self) -> serde_json::Value {
        let vitals = self.vitals();
        let current = self.current_operation().map(|op| {
            json!({
                "op_id": op.id,
                "name": op.name,
                "cores": op.cores.len(),
                "active_cells": GridMask::device(op).active_count(),
            })
        });
        let report = self.active_report().map(|r| {
            json!({
                "report_name": r.display_name(),
                "chip": r.device_info.chip,
                "operations": r.timeline.len(),
                "total_duration_us": r.total_duration_us(),
            })
        });

        json!({
            "source": self.data_source.label(),
            "vitals": vitals,
            "health": self.health(),
            "computed_health": self.computed_health(),
            "health_mode": match self.health_mode {
                HealthMode::Auto => "auto",
                HealthMode::Manual => "manual",
            },
            "playing": self.is_computing(),
            "op_index": self.current_index(),
            "timeline_len": self.timeline().len(),
            "current_op": current,
            "report": report,
        })
    }

    /// Write [`App::snapshot`] to a file as pretty JSON.
    pub fn export_state(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "state exported");
        Ok(())
    }
}
