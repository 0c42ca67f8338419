//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthState;
use crate::settings::ThemeChoice;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Ghost color per health state.
    pub healthy: Color,
    pub tired: Color,
    pub sick: Color,
    pub critical: Color,
    pub dead: Color,
    /// Lit core on the grid.
    pub core_active: Color,
    /// Idle core on the grid.
    pub core_idle: Color,
    /// Ghost silhouette cells in grid-only mode.
    pub pattern: Color,
    /// Readouts past their warning threshold.
    pub warning: Color,
    /// Secondary text.
    pub muted: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            healthy: Color::Rgb(74, 222, 128),
            tired: Color::Rgb(250, 204, 21),
            sick: Color::Rgb(249, 115, 22),
            critical: Color::Rgb(239, 68, 68),
            dead: Color::Rgb(107, 114, 128),
            core_active: Color::Rgb(34, 211, 238),
            core_idle: Color::DarkGray,
            pattern: Color::Gray,
            warning: Color::Red,
            muted: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            healthy: Color::Rgb(22, 163, 74),
            tired: Color::Rgb(202, 138, 4),
            sick: Color::Rgb(234, 88, 12),
            critical: Color::Rgb(220, 38, 38),
            dead: Color::Rgb(75, 85, 99),
            core_active: Color::Rgb(8, 145, 178),
            core_idle: Color::Gray,
            pattern: Color::DarkGray,
            warning: Color::Red,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme choice.
    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Auto => Self::auto_detect(),
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Ghost color for a health state.
    pub fn health_color(&self, state: HealthState) -> Color {
        match state {
            HealthState::Healthy => self.healthy,
            HealthState::Tired => self.tired,
            HealthState::Sick => self.sick,
            HealthState::Critical => self.critical,
            HealthState::Dead => self.dead,
        }
    }

    /// Get style for a health state
    pub fn health_style(&self, state: HealthState) -> Style {
        let style = Style::default().fg(self.health_color(state));
        match state {
            HealthState::Critical => style.add_modifier(Modifier::BOLD),
            HealthState::Dead => style.add_modifier(Modifier::DIM),
            _ => style,
        }
    }

    /// Style for a readout, red when past its warning threshold.
    pub fn readout_style(&self, warn: bool) -> Style {
        if warn {
            Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }
}
