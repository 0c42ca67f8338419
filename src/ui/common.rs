//! Common UI components shared across views.
//!
//! This module contains the stats header, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, DataSource, HealthMode, View};

/// Render the stats header: health, SRAM, temperature, power, utilization.
///
/// SRAM turns red above the sick memory threshold and TEMP above the sick
/// temperature threshold.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let vitals = app.vitals();
    let health = app.health();
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(" ● ", theme.health_style(health)),
        Span::styled("TENSIX GHOST ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(health.label(), theme.health_style(health)),
    ];
    if app.health_mode == HealthMode::Manual {
        spans.push(Span::styled(" (manual)", Style::default().fg(theme.muted)));
    }
    spans.extend([
        Span::raw(" │ SRAM "),
        Span::styled(
            format!("{}%", vitals.memory_percent),
            theme.readout_style(vitals.is_memory_high()),
        ),
        Span::raw(" │ TEMP "),
        Span::styled(
            format!("{}°C", vitals.temperature),
            theme.readout_style(vitals.is_overheating()),
        ),
        Span::raw(format!(" │ POWER {}W", vitals.power)),
        Span::raw(format!(" │ UTIL {:.0}%", vitals.utilization * 100.0)),
    ]);
    if app.data_source == DataSource::Loaded {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "LIVE DATA",
            Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
        .collect();

    let selected = View::ALL
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows the path prompt while typing, then temporary messages, then load
/// errors, then the source and context-sensitive controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if app.path_input_active {
        let line = Line::from(vec![
            Span::styled(" Open report: ", app.theme.header),
            Span::raw(app.path_input.as_str()),
            Span::styled("█", Style::default().fg(app.theme.highlight)),
            Span::styled(
                "  Enter:open Esc:cancel",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(ref err) = app.load_error {
        let paragraph = Paragraph::new(format!(" Error: {} | o:open r:reload ?:help", err))
            .style(Style::default().fg(app.theme.warning));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.current_view {
        View::Device => "Space:play g:ghost R:restart o:open Tab:switch ?:help q:quit",
        View::Controls => "↑↓:select +/-:adjust s:source m:mode [/]:state ?:help q:quit",
        View::Report => "n:next op o:open r:reload e:export ?:help q:quit",
    };
    let state = if app.is_computing() { "▶" } else { "⏸" };

    let status = format!(" {} {} | {}", state, app.source_description(), controls);
    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Center a `width` x `height` box inside `area`, shrinking to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw `lines` in a bordered modal of at most `width` x `height`,
/// centered over `area`. Long lines wrap.
pub fn render_modal(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    lines: Vec<Line>,
    (width, height): (u16, u16),
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let modal_area = centered(area, width, height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        modal_area,
    );
}

pub(super) fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!(" {}", title),
        Style::default().add_modifier(Modifier::BOLD),
    )])
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section("Navigation"),
        Line::from("  Tab ←/→ 1-3 Switch views"),
        Line::from("  Esc         Close overlay"),
        Line::from(""),
        section("Device"),
        Line::from("  Space/p     Play or pause the timeline"),
        Line::from("  n           Step to the next operation"),
        Line::from("  g           Toggle Ghost / grid view"),
        Line::from("  R           Restart with defaults"),
        Line::from(""),
        section("Controls"),
        Line::from("  ↑/↓ j/k     Select slider"),
        Line::from("  +/- ←/→     Adjust slider"),
        Line::from("  PgUp/PgDn   Adjust by 10 steps"),
        Line::from("  s           Switch data source"),
        Line::from("  m           Auto / manual health"),
        Line::from("  [ ]         Pick manual health state"),
        Line::from(""),
        section("Reports"),
        Line::from("  o           Open a report file"),
        Line::from("  r           Reload the report"),
        Line::from("  e           Export state to JSON"),
        Line::from(""),
        section("General"),
        Line::from("  a l t       About / Lexicon / Thresholds"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let height = help_text.len() as u16 + 2;
    render_modal(frame, app, area, "Help", help_text, (46, height));
}
