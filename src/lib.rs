// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # tensix-ghost
//!
//! A terminal health display for Tenstorrent Tensix telemetry.
//!
//! The device's vitals (temperature, power, L1 SRAM usage and average core
//! utilization) come either from simulation sliders or from a telemetry
//! report file. They are classified into one of five health states, which
//! drive the mood of a small ghost drawn next to the 12x12 core grid. A
//! report's operation timeline can be played back across the grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │ (logic)  │    │(render) │    │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource (report.json, watched)           │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Report source abstraction ([`ReportSource`] trait) and the
//!   watched-file implementation
//! - **[`data`]**: Report types, validation, the health classifier, the
//!   operation-to-grid mapping and timeline playback
//! - **[`ui`]**: Terminal rendering using ratatui
//! - **[`settings`]**: Layered configuration (defaults, TOML file, environment)
//! - **[`error`]**: Validation and load errors
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Start in simulation mode
//! tensix-ghost
//!
//! # Open a telemetry report
//! tensix-ghost --file sample-report.json
//!
//! # Validate a report and print its vitals
//! tensix-ghost --check sample-report.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use tensix_ghost::{classify, validate, HealthState, Vitals};
//!
//! let raw = serde_json::json!({
//!     "device_info": { "chip": "wormhole_b0", "temp": 68.0, "power": 120.0 },
//!     "l1_usage": { "used_bytes": 700000, "total_bytes": 1000000 },
//!     "op_timeline": [ { "op_id": 1, "name": "matmul", "cores": [[2, 2], [3, 3]] } ]
//! });
//! let report = validate(raw).unwrap();
//! let vitals = Vitals::from_report_default(&report);
//! assert_eq!(vitals.health(), HealthState::Sick);
//! assert_eq!(classify(80.0, 95.0, 0.9), HealthState::Dead);
//! ```

pub mod app;
pub mod data;
pub mod error;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    classify, is_active, mock_timeline, validate, Core, DeviceInfo, GridMask, HealthState,
    MemoryUsage, Operation, PerformanceSummary, Playback, Simulation, TelemetryReport, Vitals,
};
pub use error::{LoadError, ValidationError};
pub use settings::Settings;
pub use source::{load_report_file, FileSource, ReportSource};
