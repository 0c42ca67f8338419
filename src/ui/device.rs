//! Device view rendering.
//!
//! Draws the 12x12 core grid next to the Ghost, with the current operation
//! underneath. In grid-only mode the Ghost silhouette is drawn on the grid
//! itself while the timeline plays.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ghost::{pattern_cell, GhostLook};
use crate::app::App;
use crate::data::duration::format_micros;
use crate::data::{GRID_COLS, GRID_ROWS};

/// Width of the grid panel: two columns per cell plus borders.
const GRID_PANEL_WIDTH: u16 = GRID_COLS as u16 * 2 + 3;
const GRID_PANEL_HEIGHT: u16 = GRID_ROWS as u16 + 2;

/// Render the Device view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(GRID_PANEL_HEIGHT),
        Constraint::Length(3), // Current operation
    ])
    .split(area);

    let panels = if app.show_ghost {
        Layout::horizontal([Constraint::Length(GRID_PANEL_WIDTH), Constraint::Min(20)])
            .split(chunks[0])
    } else {
        Layout::horizontal([Constraint::Length(GRID_PANEL_WIDTH), Constraint::Min(0)])
            .split(chunks[0])
    };

    render_grid(frame, app, panels[0]);
    if app.show_ghost {
        render_ghost(frame, app, panels[1]);
    }
    render_current_op(frame, app, chunks[1]);
}

/// Text lines for the grid, one per row.
pub fn grid_lines(app: &App) -> Vec<Line<'static>> {
    let mask = app.grid_mask();
    let computing = app.is_computing();
    let theme = &app.theme;

    let core = Style::default().fg(theme.core_active).add_modifier(Modifier::BOLD);
    let pattern = Style::default().fg(theme.pattern);
    let idle = Style::default().fg(theme.core_idle);

    (0..mask.rows())
        .map(|row| {
            let spans: Vec<Span> = (0..mask.cols())
                .map(|col| {
                    if mask.get(row, col) {
                        Span::styled("■ ", core)
                    } else if !app.show_ghost && computing && pattern_cell(row, col) {
                        Span::styled("■ ", pattern)
                    } else {
                        Span::styled("· ", idle)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_grid(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.show_ghost {
        " Tensix Grid "
    } else {
        " Tensix Grid (ghost) "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(grid_lines(app)).block(block), area);
}

fn render_ghost(frame: &mut Frame, app: &App, area: Rect) {
    let health = app.health();
    let look = GhostLook::new(health, &app.vitals(), app.is_computing());
    let elapsed = Instant::now().saturating_duration_since(app.started());

    let mut lines = look.lines(&app.theme, elapsed);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        health.label(),
        app.theme.health_style(health),
    )));

    let block = Block::default()
        .title(" Ghost ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.health_color(health)));

    // Vertically center the art inside the panel
    let inner_height = area.height.saturating_sub(2);
    let pad = inner_height.saturating_sub(lines.len() as u16) / 2;
    let mut padded = vec![Line::from(""); pad as usize];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The `CURRENT OP` summary line.
pub fn current_op_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let len = app.timeline().len();
    let Some(op) = app.current_operation() else {
        return Line::from(Span::styled(" No operations", Style::default().fg(theme.muted)));
    };

    let mut spans = vec![
        Span::styled(" CURRENT OP ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(op.name.clone(), Style::default().fg(theme.highlight)),
        Span::raw(format!(
            "  {}/{} · {} cores",
            app.current_index() + 1,
            len,
            op.cores.len()
        )),
    ];
    if let Some(us) = op.duration_us {
        spans.push(Span::raw(format!(" · {}", format_micros(us))));
    }
    let state = if app.is_computing() {
        Span::styled("  ▶ computing", Style::default().fg(theme.core_active))
    } else {
        Span::styled("  ⏸ paused", Style::default().fg(theme.muted))
    };
    spans.push(state);
    Line::from(spans)
}

fn render_current_op(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(current_op_line(app)).block(block), area);
}
