//! Derived vitals: the four numbers the Ghost reacts to.

use serde::Serialize;

use super::health::{HealthState, SICK_MEMORY, SICK_TEMPERATURE};
use super::report::TelemetryReport;
use super::simulation::{Simulation, DEFAULT_UTILIZATION};

/// Display-ready observations for the active data source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vitals {
    /// Temperature in °C, passed through unchanged.
    pub temperature: f64,
    /// Power in W, passed through unchanged.
    pub power: f64,
    /// L1 SRAM usage in percent. Not clamped.
    pub memory_percent: f64,
    /// Average core utilization as a fraction.
    pub utilization: f64,
}

impl Vitals {
    /// Vitals for a loaded report.
    ///
    /// Utilization falls back to `fallback_utilization` when the report has
    /// no performance summary.
    pub fn from_report(report: &TelemetryReport, fallback_utilization: f64) -> Self {
        Self {
            temperature: report.device_info.temperature,
            power: report.device_info.power,
            memory_percent: report.memory.percent().unwrap_or(0) as f64,
            utilization: report
                .performance
                .as_ref()
                .map_or(fallback_utilization, |p| p.avg_utilization),
        }
    }

    /// Vitals for a loaded report using the standard 0.78 fallback.
    pub fn from_report_default(report: &TelemetryReport) -> Self {
        Self::from_report(report, DEFAULT_UTILIZATION)
    }

    /// Vitals straight from the simulation sliders.
    pub fn from_simulation(sim: &Simulation) -> Self {
        Self {
            temperature: sim.temperature,
            power: sim.power,
            memory_percent: sim.memory_percent,
            utilization: sim.utilization,
        }
    }

    /// Classify these vitals.
    pub fn health(&self) -> HealthState {
        HealthState::classify(self.temperature, self.memory_percent, self.utilization)
    }

    /// Hot enough for red eyes and sweat drops.
    pub fn is_overheating(&self) -> bool {
        self.temperature > SICK_TEMPERATURE
    }

    /// Memory high enough to color the SRAM readout.
    pub fn is_memory_high(&self) -> bool {
        self.memory_percent > SICK_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::report::{DeviceInfo, MemoryUsage, Operation, PerformanceSummary};

    fn report(performance: Option<PerformanceSummary>) -> TelemetryReport {
        TelemetryReport {
            report_name: Some("bench".into()),
            timestamp: None,
            device_info: DeviceInfo { chip: "wormhole_b0".into(), temperature: 68.0, power: 140.0 },
            memory: MemoryUsage { used_bytes: 750_000, total_bytes: 1_000_000 },
            timeline: vec![Operation::new(1, "matmul", &[(2, 2)])],
            performance,
        }
    }

    #[test]
    fn test_from_report_passes_readings_through() {
        let vitals = Vitals::from_report_default(&report(None));
        assert_eq!(vitals.temperature, 68.0);
        assert_eq!(vitals.power, 140.0);
        assert_eq!(vitals.memory_percent, 75.0);
        assert_eq!(vitals.utilization, 0.78);
        assert_eq!(vitals.health(), HealthState::Sick);
        assert!(vitals.is_overheating());
        assert!(!vitals.is_memory_high());
    }

    #[test]
    fn test_summary_utilization_wins_over_fallback() {
        let summary = PerformanceSummary { total_ops: 1, avg_utilization: 0.0, total_duration_us: None };
        let vitals = Vitals::from_report(&report(Some(summary)), 0.9);
        assert_eq!(vitals.utilization, 0.0);

        let vitals = Vitals::from_report(&report(None), 0.9);
        assert_eq!(vitals.utilization, 0.9);
    }

    #[test]
    fn test_from_simulation() {
        let vitals = Vitals::from_simulation(&Simulation::default());
        assert_eq!(vitals.memory_percent, 50.0);
        assert_eq!(vitals.health(), HealthState::Healthy);
    }
}
