//! Layered settings.
//!
//! Values are resolved from built-in defaults, then an optional TOML file,
//! then `GHOST_*` environment variables. Command-line flags are applied on
//! top by the binary.
//!
//! ```toml
//! tick = "500ms"
//! theme = "auto"
//! fallback_utilization = 0.78
//!
//! [simulation]
//! temperature = 52
//! power = 85
//! memory_percent = 50
//! utilization = 0.78
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `GHOST_SIMULATION__TEMPERATURE=68`.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::data::duration::parse_duration;
use crate::data::simulation::{Control, Simulation, DEFAULT_UTILIZATION};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "ghost.toml";

/// Terminal color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    /// Detect from the terminal background.
    #[default]
    Auto,
    Dark,
    Light,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time between playback steps, e.g. `"500ms"`.
    pub tick: String,
    pub theme: ThemeChoice,
    /// Utilization used for reports without a performance summary.
    pub fallback_utilization: f64,
    /// Starting slider values, also restored by Restart.
    pub simulation: Simulation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick: "500ms".to_string(),
            theme: ThemeChoice::Auto,
            fallback_utilization: DEFAULT_UTILIZATION,
            simulation: Simulation::default(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (required) or from [`DEFAULT_CONFIG_FILE`]
    /// if it exists, layered with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("GHOST").separator("__").try_parsing(true))
            .build()
            .context("Failed to read settings")?;

        let mut settings: Settings =
            config.try_deserialize().context("Invalid settings")?;
        settings.tick_period()?;

        // Starting values obey the same ranges as the sliders
        for control in Control::ALL {
            let value = settings.simulation.get(control);
            settings.simulation.set(control, value);
        }
        debug!(?settings, "settings resolved");
        Ok(settings)
    }

    /// The parsed playback tick.
    pub fn tick_period(&self) -> Result<Duration> {
        let tick = parse_duration(&self.tick)?;
        if tick.is_zero() {
            bail!("tick must be greater than zero");
        }
        Ok(tick)
    }
}
