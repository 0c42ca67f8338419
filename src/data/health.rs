//! Health classification for the Ghost.
//!
//! Maps three observations (temperature, L1 SRAM usage and average
//! utilization) onto one of five moods. Rules are checked in order and the
//! first match wins, so their order is part of the contract.

use serde::{Deserialize, Serialize};

/// Temperature above which the Ghost is dead, when memory is also above [`DEAD_MEMORY`].
pub const DEAD_TEMPERATURE: f64 = 75.0;
/// Memory percentage above which the Ghost is dead, when temperature is also above [`DEAD_TEMPERATURE`].
pub const DEAD_MEMORY: f64 = 90.0;
/// Temperature above which the Ghost is critical.
pub const CRITICAL_TEMPERATURE: f64 = 70.0;
/// Memory percentage above which the Ghost is critical.
pub const CRITICAL_MEMORY: f64 = 85.0;
/// Temperature above which the Ghost is sick. Also the "overheating" line for display.
pub const SICK_TEMPERATURE: f64 = 65.0;
/// Memory percentage above which the Ghost is sick.
pub const SICK_MEMORY: f64 = 75.0;
/// Average utilization below which the Ghost is tired.
pub const TIRED_UTILIZATION: f64 = 0.5;

/// Mood of the Ghost, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Tired,
    Sick,
    Critical,
    Dead,
}

impl HealthState {
    /// All states in severity order.
    pub const ALL: [HealthState; 5] = [
        HealthState::Healthy,
        HealthState::Tired,
        HealthState::Sick,
        HealthState::Critical,
        HealthState::Dead,
    ];

    /// Classify a set of observations.
    ///
    /// Total over all inputs: out-of-range, negative and NaN values are
    /// accepted. Every comparison is strict, so a value sitting exactly on a
    /// threshold does not trigger that rule.
    pub fn classify(temperature_c: f64, memory_used_percent: f64, average_utilization: f64) -> Self {
        if temperature_c > DEAD_TEMPERATURE && memory_used_percent > DEAD_MEMORY {
            HealthState::Dead
        } else if temperature_c > CRITICAL_TEMPERATURE || memory_used_percent > CRITICAL_MEMORY {
            HealthState::Critical
        } else if temperature_c > SICK_TEMPERATURE || memory_used_percent > SICK_MEMORY {
            HealthState::Sick
        } else if average_utilization < TIRED_UTILIZATION {
            HealthState::Tired
        } else {
            HealthState::Healthy
        }
    }

    /// Upper-case label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            HealthState::Healthy => "HEALTHY",
            HealthState::Tired => "TIRED",
            HealthState::Sick => "SICK",
            HealthState::Critical => "CRITICAL",
            HealthState::Dead => "DEAD",
        }
    }

    /// Legend text describing the rule that produces this state.
    pub fn rule(&self) -> &'static str {
        match self {
            HealthState::Healthy => "temp<=65 & l1<=75 & util>=50%",
            HealthState::Tired => "util < 50%",
            HealthState::Sick => "temp>65 | l1>75",
            HealthState::Critical => "temp>70 | l1>85",
            HealthState::Dead => "temp>75 AND l1>90",
        }
    }

    /// Next state in severity order, wrapping around. Used by manual mode.
    pub fn next(self) -> Self {
        match self {
            HealthState::Healthy => HealthState::Tired,
            HealthState::Tired => HealthState::Sick,
            HealthState::Sick => HealthState::Critical,
            HealthState::Critical => HealthState::Dead,
            HealthState::Dead => HealthState::Healthy,
        }
    }

    /// Previous state in severity order, wrapping around.
    pub fn prev(self) -> Self {
        match self {
            HealthState::Healthy => HealthState::Dead,
            HealthState::Tired => HealthState::Healthy,
            HealthState::Sick => HealthState::Tired,
            HealthState::Critical => HealthState::Sick,
            HealthState::Dead => HealthState::Critical,
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-function form of [`HealthState::classify`].
pub fn classify(temperature_c: f64, memory_used_percent: f64, average_utilization: f64) -> HealthState {
    HealthState::classify(temperature_c, memory_used_percent, average_utilization)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_requires_both_conditions() {
        assert_eq!(classify(75.0, 91.0, 0.9), HealthState::Critical);
        assert_eq!(classify(75.1, 91.0, 0.9), HealthState::Dead);
        assert_eq!(classify(76.0, 90.0, 0.9), HealthState::Critical);
    }

    #[test]
    fn test_dead_boundary_falls_through() {
        for u in [0.0, 0.3, 0.5, 1.0] {
            assert_ne!(classify(75.0, 90.0, u), HealthState::Dead);
            assert_eq!(classify(75.0, 90.0, u), HealthState::Critical);
        }
    }

    #[test]
    fn test_critical_boundaries() {
        assert_eq!(classify(70.0001, 0.0, 1.0), HealthState::Critical);
        // 70 is not critical, but it is still above the sick threshold
        assert_eq!(classify(70.0, 0.0, 1.0), HealthState::Sick);
        assert_eq!(classify(65.0, 75.0, 0.5), HealthState::Healthy);
        assert_eq!(classify(20.0, 85.5, 1.0), HealthState::Critical);
        assert_eq!(classify(20.0, 85.0, 1.0), HealthState::Sick);
    }

    #[test]
    fn test_sick_boundaries() {
        assert_eq!(classify(65.0, 75.0, 1.0), HealthState::Healthy);
        assert_eq!(classify(65.5, 0.0, 1.0), HealthState::Sick);
        assert_eq!(classify(40.0, 76.0, 1.0), HealthState::Sick);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(classify(76.0, 91.0, 0.1), HealthState::Dead);
        assert_eq!(classify(71.0, 0.0, 0.1), HealthState::Critical);
        assert_eq!(classify(66.0, 0.0, 0.1), HealthState::Sick);
    }

    #[test]
    fn test_tired_threshold() {
        assert_eq!(classify(40.0, 10.0, 0.49), HealthState::Tired);
        assert_eq!(classify(40.0, 10.0, 0.5), HealthState::Healthy);
    }

    #[test]
    fn test_out_of_range_inputs_are_accepted() {
        assert_eq!(classify(-40.0, -5.0, -1.0), HealthState::Tired);
        assert_eq!(classify(1000.0, 1000.0, 5.0), HealthState::Dead);
        assert_eq!(classify(f64::NAN, f64::NAN, f64::NAN), HealthState::Healthy);
        assert_eq!(classify(f64::INFINITY, 0.0, 1.0), HealthState::Critical);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let inputs = [(52.0, 50.0, 0.78), (72.0, 80.0, 0.2), (80.0, 95.0, 0.9)];
        for (t, m, u) in inputs {
            assert_eq!(classify(t, m, u), classify(t, m, u));
        }
    }

    #[test]
    fn test_simulation_defaults_are_healthy() {
        assert_eq!(classify(52.0, 50.0, 0.78), HealthState::Healthy);
    }

    #[test]
    fn test_severity_ordering_and_cycling() {
        assert!(HealthState::Healthy < HealthState::Dead);
        let mut state = HealthState::Healthy;
        for expected in HealthState::ALL.iter().skip(1) {
            state = state.next();
            assert_eq!(state, *expected);
        }
        assert_eq!(state.next(), HealthState::Healthy);
        assert_eq!(HealthState::Healthy.prev(), HealthState::Dead);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&HealthState::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
