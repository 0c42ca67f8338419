//! Informational overlays: About, Lexicon and the health thresholds legend.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use super::common::{render_modal, section};
use crate::app::{App, Overlay};
use crate::data::HealthState;

/// Glossary entries grouped by section.
pub const LEXICON: &[(&str, &[(&str, &str)])] = &[
    (
        "THE \"SILICON SOUL\" (HARDWARE)",
        &[
            (
                "Tensix Core",
                "The building block of Tenstorrent's AI processors. Each core holds five \
                 RISC-V processors, a compute engine and local memory.",
            ),
            (
                "RISC-V",
                "The open instruction set used inside each Tensix core, where five small \
                 processors manage data movement and math.",
            ),
            (
                "L1 SRAM",
                "Fast local memory (~1MB) inside each core. Faster than DRAM because data \
                 never leaves the chip.",
            ),
            (
                "2D Torus Network",
                "The on-chip highway. Opposite edges of the grid are connected, giving data \
                 shortcuts across the chip.",
            ),
            (
                "Wormhole & Blackhole",
                "Tenstorrent chip generations. Wormhole is the current flagship, Blackhole \
                 targets large AI clusters.",
            ),
        ],
    ),
    (
        "THE \"MOOD ENGINE\" (TELEMETRY)",
        &[
            (
                "Telemetry",
                "Live hardware readings: temperature, power and processor utilization.",
            ),
            (
                "tt-smi",
                "The system management command-line tool that reports power and temperature.",
            ),
            (
                "TT-NN Visualizer",
                "Produces reports of how a model moves through the chip. Those reports drive \
                 the Ghost's timeline.",
            ),
            (
                "SRAM Utilization",
                "How full the L1 memory is. High usage makes the Ghost look bloated.",
            ),
        ],
    ),
    (
        "DEVELOPER TOOLING",
        &[
            (
                "TT-Metalium",
                "The low-level SDK for writing code directly against the hardware.",
            ),
            (
                "TT-NN",
                "The high-level Python library with a PyTorch feel for running models.",
            ),
        ],
    ),
];

/// Render the active overlay, if any.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match app.overlay {
        Some(Overlay::Help) => super::common::render_help(frame, app, area),
        Some(Overlay::About) => render_about(frame, app, area),
        Some(Overlay::Lexicon) => render_lexicon(frame, app, area),
        Some(Overlay::Thresholds) => render_thresholds(frame, app, area),
        None => {}
    }
}

fn footer() -> Line<'static> {
    Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().add_modifier(Modifier::DIM),
    )])
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(vec![Span::styled("Ghost in the Machine", app.theme.header)]),
        Line::from(""),
        Line::from(
            "A health display for Tenstorrent Tensix telemetry. Readings from a device \
             report are turned into the mood of a small ghost, the silicon soul, instead \
             of a wall of graphs.",
        ),
        Line::from(""),
        Line::from(
            "Open a telemetry report with `o` and press Space to play its operation \
             timeline across the 12x12 core grid. Without a report, the Controls tab \
             drives a simulated device.",
        ),
        Line::from(""),
        Line::from(vec![Span::styled(
            "The report format is a simplified schema; real visualizer output is richer.",
            Style::default().fg(app.theme.muted),
        )]),
        Line::from(""),
        footer(),
    ];
    render_modal(frame, app, area, "About", lines, (64, 16));
}

fn render_lexicon(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for (title, entries) in LEXICON {
        lines.push(section(title));
        for (term, definition) in *entries {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", term), app.theme.header),
                Span::raw(*definition),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(footer());
    render_modal(frame, app, area, "Lexicon", lines, (80, 40));
}

fn render_thresholds(frame: &mut Frame, app: &App, area: Rect) {
    let computed = app.computed_health();
    let mut lines = vec![
        Line::from(vec![Span::styled("Health rules (first match wins)", app.theme.header)]),
        Line::from(""),
    ];
    for state in HealthState::ALL {
        let marker = if state == computed { "▶" } else { " " };
        lines.push(Line::from(vec![
            Span::raw(format!(" {} ", marker)),
            Span::styled(format!("{:<9}", state.label()), app.theme.health_style(state)),
            Span::raw(state.rule()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(footer());
    render_modal(frame, app, area, "Thresholds", lines, (60, 11));
}
