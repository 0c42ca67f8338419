//! The Ghost: a text-art mascot whose face follows the health state.

use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::Theme;
use crate::data::{HealthState, Vitals};

/// Silhouette drawn on the core grid in grid-only mode while playing.
pub const GHOST_PATTERN: [[u8; 12]; 12] = [
    [0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    [1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Whether the silhouette covers a grid cell.
pub fn pattern_cell(row: usize, col: usize) -> bool {
    GHOST_PATTERN
        .get(row)
        .and_then(|r| r.get(col))
        .is_some_and(|&v| v == 1)
}

/// Interior width of the Ghost at 0% memory.
const BASE_WIDTH: usize = 12;
/// Extra columns per side at 100% memory.
const MAX_BELLY: f64 = 4.0;
/// Pulse period bounds in seconds: fastest at high power, slowest at 0 W.
const MIN_PULSE_SECS: f64 = 0.3;
const MAX_PULSE_SECS: f64 = 2.0;

const SPIRAL: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Everything that decides how the Ghost is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostLook {
    pub health: HealthState,
    pub computing: bool,
    pub red_eyes: bool,
    pub sweat: bool,
    pub blush: bool,
    pub sparkles: bool,
    pub warning: bool,
    pub sleeping: bool,
    /// Extra columns on each side of the body.
    pub belly: usize,
    /// One full pulse of the body outline.
    pub pulse: Duration,
}

impl GhostLook {
    pub fn new(health: HealthState, vitals: &Vitals, computing: bool) -> Self {
        let overheating = vitals.is_overheating();
        let belly_ratio = (vitals.memory_percent / 100.0).clamp(0.0, 1.5);
        // max/min rather than clamp: a NaN power lands on the fast end
        let pulse_secs = (MAX_PULSE_SECS - vitals.power / 150.0)
            .max(MIN_PULSE_SECS)
            .min(MAX_PULSE_SECS);

        Self {
            health,
            computing,
            red_eyes: health == HealthState::Healthy && overheating,
            sweat: overheating && health != HealthState::Dead,
            blush: health == HealthState::Healthy && !overheating,
            sparkles: computing && matches!(health, HealthState::Healthy | HealthState::Tired),
            warning: health == HealthState::Critical,
            sleeping: health == HealthState::Tired && !computing,
            belly: (belly_ratio * MAX_BELLY).round() as usize,
            pulse: Duration::from_secs_f64(pulse_secs),
        }
    }

    /// Interior width of the body.
    pub fn width(&self) -> usize {
        BASE_WIDTH + 2 * self.belly
    }

    /// Eye glyph for an animation frame (four frames per second).
    pub fn eye(&self, frame: u64) -> &'static str {
        match self.health {
            HealthState::Dead => "x",
            HealthState::Critical => SPIRAL[(frame % 4) as usize],
            HealthState::Sick => SPIRAL[((frame / 3) % 4) as usize],
            HealthState::Tired => "-",
            HealthState::Healthy => "●",
        }
    }

    /// Three-column mouth for an animation frame.
    pub fn mouth(&self, frame: u64) -> &'static str {
        match self.health {
            HealthState::Dead => "───",
            HealthState::Critical if frame % 2 == 0 => "/\\/",
            HealthState::Critical => "\\/\\",
            HealthState::Sick => "~~~",
            HealthState::Tired => "___",
            HealthState::Healthy if self.computing && frame % 2 == 1 => " o ",
            HealthState::Healthy => "\\_/",
        }
    }

    fn body_style(&self, theme: &Theme, elapsed: Duration) -> Style {
        let style = Style::default().fg(theme.health_color(self.health));
        if self.health == HealthState::Dead {
            return style.add_modifier(Modifier::DIM);
        }
        let period = self.pulse.as_secs_f64();
        if elapsed.as_secs_f64() % period < period / 2.0 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Render the Ghost as lines of equal width.
    pub fn lines(&self, theme: &Theme, elapsed: Duration) -> Vec<Line<'static>> {
        let frame = (elapsed.as_millis() / 250) as u64;
        let w = self.width();
        let body = self.body_style(theme, elapsed);
        let face = if self.red_eyes {
            Style::default().fg(theme.warning).add_modifier(Modifier::BOLD)
        } else {
            body
        };

        // Extras float above the head.
        let mut extras = blank(w + 2);
        if self.warning && frame % 2 == 0 {
            put(&mut extras, (w + 2) / 2, "⚠", Style::default().fg(theme.critical));
        }
        if self.sleeping {
            let z = Style::default().fg(theme.muted);
            put(&mut extras, w - 1, "z", z);
            if frame % 4 >= 2 {
                put(&mut extras, w + 1, "Z", z);
            }
        }
        if self.sparkles {
            let s = Style::default().fg(theme.core_active);
            let shift = (frame % 2) as usize;
            put(&mut extras, 1 + shift, "✦", s);
            put(&mut extras, w - shift, "✧", s);
        }
        if self.sweat {
            let drop = Style::default().fg(Color::LightBlue);
            put(&mut extras, if frame % 2 == 0 { 0 } else { 2 }, "'", drop);
        }

        let mut eyes = blank(w);
        let left = w / 4;
        let right = w - 1 - w / 4;
        put(&mut eyes, left, self.eye(frame), face);
        put(&mut eyes, right, self.eye(frame), face);

        let mut mouth = blank(w);
        if self.blush {
            let blush = Style::default().fg(Color::LightMagenta);
            put(&mut mouth, 1, "*", blush);
            put(&mut mouth, w - 2, "*", blush);
        }
        let m = self.mouth(frame);
        for (i, ch) in m.chars().enumerate() {
            put(&mut mouth, (w - 3) / 2 + i, &ch.to_string(), body);
        }

        let skirt: String = "/\\".repeat(w / 2 + 1).chars().take(w + 2).collect();

        vec![
            Line::from(extras),
            Line::from(Span::styled(format!("╭{}╮", "─".repeat(w)), body)),
            framed(blank(w), body),
            framed(eyes, body),
            framed(mouth, body),
            framed(blank(w), body),
            framed(blank(w), body),
            Line::from(Span::styled(skirt, body)),
        ]
    }
}

fn blank(width: usize) -> Vec<Span<'static>> {
    vec![Span::raw(" "); width]
}

fn put(cells: &mut [Span<'static>], index: usize, glyph: &str, style: Style) {
    if let Some(cell) = cells.get_mut(index) {
        *cell = Span::styled(glyph.to_string(), style);
    }
}

fn framed(interior: Vec<Span<'static>>, border: Style) -> Line<'static> {
    let mut spans = Vec::with_capacity(interior.len() + 2);
    spans.push(Span::styled("│", border));
    spans.extend(interior);
    spans.push(Span::styled("│", border));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(temperature: f64, power: f64, memory_percent: f64) -> Vitals {
        Vitals {
            temperature,
            power,
            memory_percent,
            utilization: 0.8,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_healthy_idle() {
        let look = GhostLook::new(HealthState::Healthy, &vitals(52.0, 85.0, 50.0), false);
        assert!(look.blush);
        assert!(!look.red_eyes);
        assert!(!look.sweat);
        assert!(!look.sparkles);
        assert_eq!(look.belly, 2);
    }

    #[test]
    fn test_overheating_healthy_has_red_eyes_and_sweat() {
        let look = GhostLook::new(HealthState::Healthy, &vitals(68.0, 85.0, 50.0), true);
        assert!(look.red_eyes);
        assert!(look.sweat);
        assert!(!look.blush);
        assert!(look.sparkles);
    }

    #[test]
    fn test_dead_never_sweats() {
        let look = GhostLook::new(HealthState::Dead, &vitals(80.0, 85.0, 50.0), true);
        assert!(!look.sweat);
        assert!(!look.sparkles);
        assert_eq!(look.eye(0), "x");
    }

    #[test]
    fn test_tired_sleeps_only_when_idle() {
        let v = vitals(50.0, 85.0, 50.0);
        assert!(GhostLook::new(HealthState::Tired, &v, false).sleeping);
        let busy = GhostLook::new(HealthState::Tired, &v, true);
        assert!(!busy.sleeping);
        assert!(busy.sparkles);
    }

    #[test]
    fn test_critical_spins_faster_than_sick() {
        let v = vitals(50.0, 85.0, 50.0);
        let critical = GhostLook::new(HealthState::Critical, &v, false);
        let sick = GhostLook::new(HealthState::Sick, &v, false);
        assert!(critical.warning);
        assert_ne!(critical.eye(0), critical.eye(1));
        assert_eq!(sick.eye(0), sick.eye(1));
        assert_ne!(sick.eye(0), sick.eye(3));
    }

    #[test]
    fn test_pulse_speeds_up_with_power() {
        let slow = GhostLook::new(HealthState::Healthy, &vitals(50.0, 10.0, 0.0), false);
        let fast = GhostLook::new(HealthState::Healthy, &vitals(50.0, 200.0, 0.0), false);
        assert!(fast.pulse < slow.pulse);
        let floor = GhostLook::new(HealthState::Healthy, &vitals(50.0, 400.0, 0.0), false);
        assert_eq!(floor.pulse, Duration::from_secs_f64(0.3));
    }

    #[test]
    fn test_extreme_vitals_still_draw() {
        let theme = Theme::dark();
        let cases = [
            vitals(50.0, -1e30, 50.0),
            vitals(50.0, 1e30, 1e30),
            vitals(-1e30, f64::NAN, -1e30),
            vitals(f64::INFINITY, f64::NEG_INFINITY, f64::NAN),
        ];
        for v in &cases {
            let look = GhostLook::new(v.health(), v, true);
            assert!(look.pulse >= Duration::from_secs_f64(MIN_PULSE_SECS));
            assert!(look.pulse <= Duration::from_secs_f64(MAX_PULSE_SECS));
            assert!(look.width() <= BASE_WIDTH + 2 * 6);
            for ms in [0, 250, 1_000] {
                let lines = look.lines(&theme, Duration::from_millis(ms));
                assert!(!lines.is_empty());
            }
        }
    }

    #[test]
    fn test_belly_grows_with_memory() {
        let empty = GhostLook::new(HealthState::Healthy, &vitals(50.0, 85.0, 0.0), false);
        let full = GhostLook::new(HealthState::Healthy, &vitals(50.0, 85.0, 100.0), false);
        assert_eq!(empty.width(), 12);
        assert_eq!(full.width(), 20);
    }

    #[test]
    fn test_lines_have_equal_width() {
        let theme = Theme::dark();
        for state in HealthState::ALL {
            for computing in [false, true] {
                let look = GhostLook::new(state, &vitals(68.0, 85.0, 95.0), computing);
                for ms in [0, 250, 500, 750] {
                    let lines = look.lines(&theme, Duration::from_millis(ms));
                    let widths: Vec<usize> =
                        lines.iter().map(|l| text(l).chars().count()).collect();
                    assert!(widths.iter().all(|&w| w == look.width() + 2), "{state:?} {widths:?}");
                }
            }
        }
    }

    #[test]
    fn test_pattern_cell_bounds() {
        assert!(pattern_cell(0, 4));
        assert!(!pattern_cell(4, 3));
        assert!(!pattern_cell(12, 0));
        assert!(!pattern_cell(0, 12));
    }
}
