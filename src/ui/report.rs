//! Report view rendering.
//!
//! Shows the loaded report's device info, memory and performance summary
//! above its operation timeline. The current operation is highlighted.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, DataSource};
use crate::data::duration::{format_duration, format_micros};
use crate::data::TelemetryReport;

/// Render the Report view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(report) = app.report() else {
        render_empty(frame, app, area);
        return;
    };

    let chunks = Layout::vertical([Constraint::Length(7), Constraint::Min(5)]).split(area);
    render_info(frame, app, report, chunks[0]);
    render_timeline(frame, app, report, chunks[1]);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  No report loaded. Press "),
            Span::styled("o", app.theme.header),
            Span::raw(" and type the path of a telemetry .json file."),
        ]),
    ];
    if let Some(ref err) = app.load_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", err),
            Style::default().fg(app.theme.warning),
        )));
    }

    let block = Block::default()
        .title(" Report ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Key/value lines describing a report.
pub fn info_lines(app: &App, report: &TelemetryReport) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let memory = match report.memory.percent() {
        Some(pct) => format!(
            "{} / {} bytes ({}%)",
            report.memory.used_bytes, report.memory.total_bytes, pct
        ),
        None => "-".to_string(),
    };
    let performance = match &report.performance {
        Some(p) => {
            let mut text = format!("{} ops · avg util {:.0}%", p.total_ops, p.avg_utilization * 100.0);
            if let Some(us) = p.total_duration_us {
                text.push_str(&format!(" · {}", format_micros(us)));
            }
            text
        }
        None => "not reported".to_string(),
    };

    vec![
        Line::from(vec![
            Span::styled(format!(" {}", report.display_name()), bold),
            Span::styled(
                report
                    .timestamp
                    .as_deref()
                    .map(|t| format!("  {}", t))
                    .unwrap_or_default(),
                Style::default().fg(app.theme.muted),
            ),
        ]),
        Line::from(vec![
            Span::raw(" Chip: "),
            Span::styled(report.device_info.chip.clone(), bold),
            Span::raw(format!(
                "   Temp: {}°C   Power: {}W",
                report.device_info.temperature, report.device_info.power
            )),
        ]),
        Line::from(format!(" L1 SRAM: {}", memory)),
        Line::from(format!(" Performance: {}", performance)),
        Line::from(Span::styled(
            format!(
                " Playback tick {} · {}",
                format_duration(app.playback.tick_period()),
                if app.data_source == DataSource::Loaded {
                    "active source"
                } else {
                    "inactive (simulation selected)"
                }
            ),
            Style::default().fg(app.theme.muted),
        )),
    ]
}

fn render_info(frame: &mut Frame, app: &App, report: &TelemetryReport, area: Rect) {
    let block = Block::default()
        .title(" Report ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    frame.render_widget(Paragraph::new(info_lines(app, report)).block(block), area);
}

fn render_timeline(frame: &mut Frame, app: &App, report: &TelemetryReport, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Op"),
        Cell::from("Name"),
        Cell::from("Cores"),
        Cell::from("Duration"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = report
        .timeline
        .iter()
        .enumerate()
        .map(|(i, op)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(op.id.to_string()),
                Cell::from(op.name.clone()),
                Cell::from(op.cores.len().to_string()),
                Cell::from(op.duration_us.map(format_micros).unwrap_or("-".into())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // #
        Constraint::Length(6),  // Op id
        Constraint::Fill(3),    // Name
        Constraint::Length(7),  // Cores
        Constraint::Length(10), // Duration
    ];

    let total = report
        .total_duration_us()
        .map(|us| format!(" · {}", format_micros(us)))
        .unwrap_or_default();
    let title = format!(" Timeline ({} ops{}) ", report.timeline.len(), total);

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    // Only the active source has a meaningful playback position
    let mut state = TableState::default();
    if app.data_source == DataSource::Loaded {
        state.select(Some(app.current_index()));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
