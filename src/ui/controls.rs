//! Controls view rendering.
//!
//! Simulation sliders on the left; data source and health mode on the right.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, DataSource, HealthMode};
use crate::data::health::{SICK_MEMORY, SICK_TEMPERATURE};
use crate::data::{Control, HealthState};

/// Width of a slider bar in cells.
const BAR_WIDTH: usize = 24;

/// Render the Controls view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(area);
    let right = Layout::vertical([Constraint::Length(5), Constraint::Min(8)]).split(chunks[1]);

    render_sliders(frame, app, chunks[0]);
    render_source(frame, app, right[0]);
    render_health_mode(frame, app, right[1]);
}

/// A text slider bar filled to `ratio`.
pub fn slider_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Display value for a control, with its unit.
pub fn format_control(control: Control, value: f64) -> String {
    match control {
        Control::Temperature => format!("{:.0}°C", value),
        Control::Power => format!("{:.0}W", value),
        Control::Memory => format!("{:.0}%", value),
        Control::Utilization => format!("{:.0}%", value * 100.0),
    }
}

fn render_sliders(frame: &mut Frame, app: &App, area: Rect) {
    let locked = app.data_source != DataSource::Simulation;
    let vitals = app.vitals();

    let mut lines = Vec::new();
    for control in Control::ALL {
        let selected = control == app.selected_control;
        let value = app.simulation.get(control);
        let warn = match control {
            Control::Temperature => app.simulation.temperature > SICK_TEMPERATURE,
            Control::Memory => app.simulation.memory_percent > SICK_MEMORY,
            _ => false,
        };

        let label_style = if selected && !locked {
            app.theme.selected
        } else {
            Style::default()
        };
        let bar_style = if locked {
            Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM)
        } else if warn {
            Style::default().fg(app.theme.warning)
        } else {
            Style::default().fg(app.theme.highlight)
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { " ▸ " } else { "   " }, label_style),
            Span::styled(format!("{:<15}", control.label()), label_style),
            Span::styled(format_control(control, value), app.theme.readout_style(warn)),
        ]));
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(slider_bar(app.simulation.ratio(control), BAR_WIDTH), bar_style),
        ]));
        lines.push(Line::from(""));
    }

    if locked {
        lines.push(Line::from(Span::styled(
            " Showing loaded data; press s to drive the simulation.",
            Style::default().fg(app.theme.muted),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::raw(" Computed: "),
            Span::styled(vitals.health().label(), app.theme.health_style(vitals.health())),
        ]));
    }

    let block = Block::default()
        .title(" Simulation ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn option_line(label: &str, active: bool, enabled: bool, app: &App) -> Line<'static> {
    let marker = if active { " (•) " } else { " ( ) " };
    let style = if !enabled {
        Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM)
    } else if active {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{}{}", marker, label), style))
}

fn render_source(frame: &mut Frame, app: &App, area: Rect) {
    let has_report = app.report().is_some();
    let lines = vec![
        option_line(
            DataSource::Simulation.label(),
            app.data_source == DataSource::Simulation,
            true,
            app,
        ),
        option_line(
            DataSource::Loaded.label(),
            app.data_source == DataSource::Loaded,
            has_report,
            app,
        ),
    ];
    let block = Block::default()
        .title(" Data Source [s] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_health_mode(frame: &mut Frame, app: &App, area: Rect) {
    let manual = app.health_mode == HealthMode::Manual;
    let mut lines = vec![
        option_line("Auto", !manual, true, app),
        option_line("Manual", manual, true, app),
        Line::from(""),
    ];
    for state in HealthState::ALL {
        let picked = manual && state == app.manual_health;
        let style = if picked {
            app.theme.health_style(state).add_modifier(Modifier::REVERSED)
        } else if manual {
            app.theme.health_style(state)
        } else {
            Style::default().fg(app.theme.muted)
        };
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(format!(" {} ", state.label()), style),
        ]));
    }

    let block = Block::default()
        .title(" Health Mode [m] ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_bar() {
        assert_eq!(slider_bar(0.0, 4), "░░░░");
        assert_eq!(slider_bar(0.5, 4), "██░░");
        assert_eq!(slider_bar(1.0, 4), "████");
        assert_eq!(slider_bar(2.0, 4), "████");
    }

    #[test]
    fn test_format_control() {
        assert_eq!(format_control(Control::Temperature, 52.0), "52°C");
        assert_eq!(format_control(Control::Power, 85.0), "85W");
        assert_eq!(format_control(Control::Utilization, 0.78), "78%");
    }
}
