//! Terminal UI rendering using ratatui.
//!
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`device`]: Core grid, the Ghost and the current operation
//! - [`controls`]: Simulation sliders, data source and health mode
//! - [`report`]: Loaded report details and its operation timeline
//! - [`ghost`]: Text-art Ghost and the grid silhouette
//! - [`overlay`]: About, Lexicon and Thresholds modals
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Stats header (common::render_header) │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (device/controls/report::render)     │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlays rendered on top (overlay::render)
//! ```

pub mod common;
pub mod controls;
pub mod device;
pub mod ghost;
pub mod overlay;
pub mod report;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View};

/// Minimum terminal size for usable display.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// Draw one full frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Stats header
        Constraint::Length(1), // Tabs
        Constraint::Min(16),   // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match app.current_view {
        View::Device => device::render(frame, app, chunks[2]),
        View::Controls => controls::render(frame, app, chunks[2]),
        View::Report => report::render(frame, app, chunks[2]),
    }

    common::render_status_bar(frame, app, chunks[3]);

    overlay::render(frame, app, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Overlay;
    use crate::settings::{Settings, ThemeChoice};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let settings = Settings {
            theme: ThemeChoice::Dark,
            ..Settings::default()
        };
        App::new(&settings).unwrap()
    }

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draws_every_view() {
        let mut app = app();
        let device = screen(&app, 100, 30);
        assert!(device.contains("TENSIX GHOST"));
        assert!(device.contains("HEALTHY"));
        assert!(device.contains("SRAM 50%"));
        assert!(device.contains("embedding"));

        app.set_view(View::Controls);
        let controls = screen(&app, 100, 30);
        assert!(controls.contains("Temperature"));
        assert!(controls.contains("Data Source"));

        app.set_view(View::Report);
        let report = screen(&app, 100, 30);
        assert!(report.contains("No report loaded"));
    }

    #[test]
    fn test_draws_overlays() {
        let mut app = app();
        for overlay in [Overlay::Help, Overlay::About, Overlay::Lexicon, Overlay::Thresholds] {
            app.overlay = Some(overlay);
            let text = screen(&app, 100, 44);
            assert!(!text.is_empty());
        }
        app.overlay = Some(Overlay::Thresholds);
        assert!(screen(&app, 100, 44).contains("first match wins"));
    }

    #[test]
    fn test_too_small() {
        let app = app();
        assert!(screen(&app, 40, 10).contains("Terminal too small"));
    }
}
