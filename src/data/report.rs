//! Telemetry report types.
//!
//! These types match the JSON reports exported for the Ghost (a simplified
//! schema derived from ttnn-visualizer output). Keys are snake_case on the
//! wire; the camelCase spellings are accepted as aliases.

use serde::{Deserialize, Serialize};

/// A grid coordinate as it appears in an operation's `cores` list.
///
/// Serialized as a two-element array `[row, col]`. Coordinates are not
/// bounds-checked; anything outside the rendered grid simply never lights up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Core(pub i64, pub i64);

impl Core {
    pub fn row(&self) -> i64 {
        self.0
    }

    pub fn col(&self) -> i64 {
        self.1
    }
}

/// One step of an execution timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "op_id", alias = "opId", alias = "id")]
    pub id: i64,
    pub name: String,
    pub cores: Vec<Core>,
    #[serde(
        rename = "duration_us",
        alias = "durationMicros",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_us: Option<u64>,
}

impl Operation {
    /// Build an operation from `(row, col)` pairs.
    pub fn new(id: i64, name: impl Into<String>, cores: &[(i64, i64)]) -> Self {
        Self {
            id,
            name: name.into(),
            cores: cores.iter().map(|&(r, c)| Core(r, c)).collect(),
            duration_us: None,
        }
    }

    /// Attach a display-only duration.
    pub fn with_duration_us(mut self, duration_us: u64) -> Self {
        self.duration_us = Some(duration_us);
        self
    }
}

/// Chip identity and instantaneous readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub chip: String,
    /// Temperature in °C.
    #[serde(rename = "temp", alias = "temperature")]
    pub temperature: f64,
    /// Power draw in W.
    pub power: f64,
}

/// L1 SRAM occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    #[serde(alias = "usedBytes")]
    pub used_bytes: u64,
    #[serde(alias = "totalBytes")]
    pub total_bytes: u64,
}

impl MemoryUsage {
    /// Usage as a whole percentage, `round(used / total * 100)`.
    ///
    /// Not clamped: a report claiming more used than total bytes yields a
    /// value above 100. Returns `None` when `total_bytes` is zero.
    pub fn percent(&self) -> Option<i64> {
        if self.total_bytes == 0 {
            return None;
        }
        let ratio = self.used_bytes as f64 / self.total_bytes as f64;
        Some((ratio * 100.0).round() as i64)
    }
}

/// Aggregate statistics for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    #[serde(alias = "totalOperations")]
    pub total_ops: u64,
    /// Expected in `[0, 1]` but not enforced.
    #[serde(alias = "averageUtilization")]
    pub avg_utilization: f64,
    #[serde(
        alias = "totalDurationMicros",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_duration_us: Option<u64>,
}

/// A complete telemetry report, the unit loaded from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    #[serde(alias = "reportName", default, skip_serializing_if = "Option::is_none")]
    pub report_name: Option<String>,

    /// Free-form timestamp, not parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(alias = "deviceInfo")]
    pub device_info: DeviceInfo,

    #[serde(rename = "l1_usage", alias = "memoryUsage", alias = "l1Usage")]
    pub memory: MemoryUsage,

    #[serde(rename = "op_timeline", alias = "operationTimeline", alias = "opTimeline")]
    pub timeline: Vec<Operation>,

    #[serde(
        rename = "perf_summary",
        alias = "performanceSummary",
        alias = "perfSummary",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub performance: Option<PerformanceSummary>,
}

impl TelemetryReport {
    /// Display name, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.report_name.as_deref().unwrap_or("Report Loaded")
    }

    /// Total duration of the timeline: the summary value if present,
    /// otherwise the sum of the per-operation durations that are known.
    pub fn total_duration_us(&self) -> Option<u64> {
        if let Some(total) = self.performance.as_ref().and_then(|p| p.total_duration_us) {
            return Some(total);
        }
        let known: Vec<u64> = self.timeline.iter().filter_map(|op| op.duration_us).collect();
        if known.is_empty() {
            None
        } else {
            Some(known.iter().sum())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_report() {
        let json = r#"{
            "report_name": "llama-block",
            "device_info": { "chip": "wormhole_b0", "temp": 61.5, "power": 102.0 },
            "l1_usage": { "used_bytes": 750000, "total_bytes": 1000000 },
            "op_timeline": [
                { "op_id": 1, "name": "embedding", "cores": [[0, 0], [0, 1]], "duration_us": 120 }
            ]
        }"#;

        let report: TelemetryReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.display_name(), "llama-block");
        assert_eq!(report.device_info.chip, "wormhole_b0");
        assert_eq!(report.device_info.temperature, 61.5);
        assert_eq!(report.memory.percent(), Some(75));
        assert_eq!(report.timeline[0].cores, vec![Core(0, 0), Core(0, 1)]);
        assert_eq!(report.timeline[0].duration_us, Some(120));
        assert!(report.performance.is_none());
        assert!(report.timestamp.is_none());
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{
            "reportName": "camel",
            "deviceInfo": { "chip": "blackhole", "temperature": 40, "power": 90 },
            "memoryUsage": { "usedBytes": 1, "totalBytes": 4 },
            "operationTimeline": [ { "id": 7, "name": "ffn", "cores": [] } ],
            "performanceSummary": { "totalOperations": 1, "averageUtilization": 0.4 }
        }"#;

        let report: TelemetryReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.timeline[0].id, 7);
        assert_eq!(report.memory.percent(), Some(25));
        assert_eq!(report.performance.unwrap().avg_utilization, 0.4);
    }

    #[test]
    fn test_memory_percent_is_not_clamped() {
        let over = MemoryUsage { used_bytes: 1_500, total_bytes: 1_000 };
        assert_eq!(over.percent(), Some(150));

        let zero = MemoryUsage { used_bytes: 0, total_bytes: 0 };
        assert_eq!(zero.percent(), None);
    }

    #[test]
    fn test_memory_percent_rounds() {
        let usage = MemoryUsage { used_bytes: 750_000, total_bytes: 1_000_000 };
        assert_eq!(usage.percent(), Some(75));
        let half = MemoryUsage { used_bytes: 3, total_bytes: 8 };
        assert_eq!(half.percent(), Some(38));
        let third = MemoryUsage { used_bytes: 1, total_bytes: 3 };
        assert_eq!(third.percent(), Some(33));
    }

    #[test]
    fn test_total_duration_prefers_summary() {
        let mut report = TelemetryReport {
            report_name: None,
            timestamp: None,
            device_info: DeviceInfo { chip: "wormhole".into(), temperature: 50.0, power: 80.0 },
            memory: MemoryUsage { used_bytes: 1, total_bytes: 2 },
            timeline: vec![
                Operation::new(1, "a", &[]).with_duration_us(10),
                Operation::new(2, "b", &[]),
                Operation::new(3, "c", &[]).with_duration_us(5),
            ],
            performance: None,
        };
        assert_eq!(report.total_duration_us(), Some(15));
        assert_eq!(report.display_name(), "Report Loaded");

        report.performance = Some(PerformanceSummary {
            total_ops: 3,
            avg_utilization: 0.8,
            total_duration_us: Some(100),
        });
        assert_eq!(report.total_duration_us(), Some(100));
    }
}
