//! Data models and the pure logic behind the Ghost.
//!
//! ## Submodules
//!
//! - [`report`]: Telemetry report types as they appear in JSON files
//! - [`validate`]: Presence checks and typed decode of untrusted JSON
//! - [`health`]: The five-state health classifier ([`HealthState`])
//! - [`grid`]: Operation-to-core-grid mapping ([`is_active`], [`GridMask`])
//! - [`vitals`]: Derived display metrics for the active data source
//! - [`simulation`]: Simulation sliders and the built-in mock timeline
//! - [`playback`]: Timeline playback state machine
//! - [`duration`]: Parsing and formatting of duration strings
//!
//! ## Data Flow
//!
//! ```text
//! report.json ──▶ serde_json::Value ──▶ validate() ──▶ TelemetryReport
//!                                                          │
//!           Simulation sliders ────────────┐               │
//!                                          ▼               ▼
//!                                       Vitals ──▶ HealthState::classify()
//!
//! Operation (current playback index) ──▶ GridMask (12x12 is_active)
//! ```

pub mod duration;
pub mod grid;
pub mod health;
pub mod playback;
pub mod report;
pub mod simulation;
pub mod validate;
pub mod vitals;

pub use grid::{is_active, GridMask, GRID_COLS, GRID_ROWS};
pub use health::{classify, HealthState};
pub use playback::{Playback, PlaybackState};
pub use report::{Core, DeviceInfo, MemoryUsage, Operation, PerformanceSummary, TelemetryReport};
pub use simulation::{mock_timeline, Control, Simulation};
pub use validate::validate;
pub use vitals::Vitals;
