//! Duration strings for settings and operation timings.
//!
//! Settings use short forms such as `"500ms"` or `"1.5s"`; operation
//! durations arrive as integer microseconds and are formatted for display.

use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to microseconds multiplier. Two-letter suffixes come before `s`
/// so that `"ms"` is not read as seconds.
const UNITS: &[(&str, f64)] = &[
    ("µs", 1.0),
    ("us", 1.0),
    ("ms", 1_000.0),
    ("s", 1_000_000.0),
];

/// Parse a duration string like `"500ms"`, `"0.25s"` or `"750us"`.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_micros((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {} (expected e.g. 500ms, 1s, 250us)", s)
}

/// Format a microsecond count for display (`"850µs"`, `"1.20ms"`, `"2.50s"`).
pub fn format_micros(micros: u64) -> String {
    if micros < 1_000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1_000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a duration for display, at microsecond resolution.
pub fn format_duration(d: Duration) -> String {
    format_micros(d.as_micros().min(u64::MAX as u128) as u64)
}
