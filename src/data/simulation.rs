//! Simulated telemetry used when no report is loaded.

use serde::{Deserialize, Serialize};

use super::report::Operation;

/// Default simulated temperature in °C.
pub const DEFAULT_TEMPERATURE: f64 = 52.0;
/// Default simulated power in W.
pub const DEFAULT_POWER: f64 = 85.0;
/// Default simulated L1 SRAM usage in percent.
pub const DEFAULT_MEMORY_PERCENT: f64 = 50.0;
/// Default simulated average utilization, also the fallback for reports
/// without a performance summary.
pub const DEFAULT_UTILIZATION: f64 = 0.78;

/// An adjustable simulation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Temperature,
    Power,
    Memory,
    Utilization,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Temperature,
        Control::Power,
        Control::Memory,
        Control::Utilization,
    ];

    pub fn next(self) -> Self {
        match self {
            Control::Temperature => Control::Power,
            Control::Power => Control::Memory,
            Control::Memory => Control::Utilization,
            Control::Utilization => Control::Temperature,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Control::Temperature => Control::Utilization,
            Control::Power => Control::Temperature,
            Control::Memory => Control::Power,
            Control::Utilization => Control::Memory,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Control::Temperature => "Temperature",
            Control::Power => "Power",
            Control::Memory => "L1 SRAM Usage",
            Control::Utilization => "Utilization",
        }
    }

    /// Slider range in the control's own unit. Utilization is a fraction.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Control::Temperature => (30.0, 90.0),
            Control::Power => (10.0, 200.0),
            Control::Memory => (0.0, 100.0),
            Control::Utilization => (0.0, 1.0),
        }
    }

    /// Increment applied per key press.
    pub fn step(&self) -> f64 {
        match self {
            Control::Temperature => 1.0,
            Control::Power => 5.0,
            Control::Memory => 1.0,
            Control::Utilization => 0.01,
        }
    }
}

/// Slider values for the simulated device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Simulation {
    pub temperature: f64,
    pub power: f64,
    pub memory_percent: f64,
    pub utilization: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            power: DEFAULT_POWER,
            memory_percent: DEFAULT_MEMORY_PERCENT,
            utilization: DEFAULT_UTILIZATION,
        }
    }
}

impl Simulation {
    pub fn get(&self, control: Control) -> f64 {
        match control {
            Control::Temperature => self.temperature,
            Control::Power => self.power,
            Control::Memory => self.memory_percent,
            Control::Utilization => self.utilization,
        }
    }

    /// Set a control, clamped to its slider range.
    pub fn set(&mut self, control: Control, value: f64) {
        let (min, max) = control.range();
        let value = value.clamp(min, max);
        match control {
            Control::Temperature => self.temperature = value,
            Control::Power => self.power = value,
            Control::Memory => self.memory_percent = value,
            Control::Utilization => self.utilization = value,
        }
    }

    /// Move a control by `steps` increments.
    pub fn nudge(&mut self, control: Control, steps: i32) {
        let value = self.get(control) + control.step() * f64::from(steps);
        // Snap to the step grid so repeated 0.01 increments don't drift.
        let snapped = (value / control.step()).round() * control.step();
        self.set(control, snapped);
    }

    /// Position of a control within its range, in `[0, 1]`.
    pub fn ratio(&self, control: Control) -> f64 {
        let (min, max) = control.range();
        ((self.get(control) - min) / (max - min)).clamp(0.0, 1.0)
    }
}

/// The built-in eight-operation timeline shown in simulation mode.
pub fn mock_timeline() -> Vec<Operation> {
    vec![
        Operation::new(1, "embedding", &[(0, 0), (0, 1), (1, 0), (1, 1), (0, 2), (1, 2)]),
        Operation::new(
            2,
            "matmul",
            &[(2, 2), (2, 3), (3, 2), (3, 3), (4, 4), (5, 5), (4, 5), (5, 4)],
        ),
        Operation::new(3, "layernorm", &[(6, 6), (7, 7), (8, 8), (6, 7), (7, 8)]),
        Operation::new(4, "attention", &[(3, 5), (4, 6), (5, 7), (6, 8), (7, 9), (8, 10)]),
        Operation::new(5, "softmax", &[(9, 9), (10, 10), (11, 11), (9, 10), (10, 11)]),
        Operation::new(
            6,
            "ffn",
            &[(0, 5), (1, 6), (2, 7), (3, 8), (4, 9), (5, 10), (6, 11)],
        ),
        Operation::new(7, "residual", &[(2, 0), (3, 1), (4, 2), (5, 3), (6, 4), (7, 5)]),
        Operation::new(8, "output", &[(8, 6), (9, 7), (10, 8), (11, 9), (10, 9), (11, 10)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::grid::is_active;

    #[test]
    fn test_defaults() {
        let sim = Simulation::default();
        assert_eq!(sim.temperature, 52.0);
        assert_eq!(sim.power, 85.0);
        assert_eq!(sim.memory_percent, 50.0);
        assert_eq!(sim.utilization, 0.78);
    }

    #[test]
    fn test_mock_timeline_shape() {
        let timeline = mock_timeline();
        let names: Vec<&str> = timeline.iter().map(|op| op.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["embedding", "matmul", "layernorm", "attention", "softmax", "ffn", "residual", "output"]
        );
        assert_eq!(timeline[1].cores.len(), 8);
        assert!(is_active(&timeline[1], 2, 2));
        assert!(is_active(&timeline[4], 11, 11));
        assert!(timeline.iter().all(|op| op.duration_us.is_none()));
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut sim = Simulation::default();
        sim.set(Control::Temperature, 120.0);
        assert_eq!(sim.temperature, 90.0);
        sim.set(Control::Power, 0.0);
        assert_eq!(sim.power, 10.0);
        sim.set(Control::Utilization, 1.5);
        assert_eq!(sim.utilization, 1.0);
    }

    #[test]
    fn test_nudge_snaps_to_step() {
        let mut sim = Simulation::default();
        sim.nudge(Control::Utilization, -29);
        assert!((sim.utilization - 0.49).abs() < 1e-9);
        sim.nudge(Control::Temperature, 14);
        assert_eq!(sim.temperature, 66.0);
        sim.nudge(Control::Memory, -100);
        assert_eq!(sim.memory_percent, 0.0);
    }

    #[test]
    fn test_control_cycle() {
        let mut control = Control::Temperature;
        for _ in 0..Control::ALL.len() {
            control = control.next();
        }
        assert_eq!(control, Control::Temperature);
        assert_eq!(Control::Temperature.prev(), Control::Utilization);
    }

    #[test]
    fn test_ratio() {
        let mut sim = Simulation::default();
        sim.set(Control::Temperature, 60.0);
        assert!((sim.ratio(Control::Temperature) - 0.5).abs() < 1e-9);
    }
}
