use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Overlay, View, EXPORT_FILE};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If an overlay is shown, any key closes it
    if app.overlay.is_some() {
        app.close_overlay();
        return;
    }

    // If the path prompt is active, handle text input
    if app.path_input_active {
        handle_path_input(app, key);
        return;
    }

    // Sliders take the arrow keys on the Controls view
    if app.current_view == View::Controls && handle_controls_key(app, key) {
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left => app.prev_view(),
        KeyCode::Right => app.next_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Device),
        KeyCode::Char('2') => app.set_view(View::Controls),
        KeyCode::Char('3') => app.set_view(View::Report),

        // Playback
        KeyCode::Char(' ') | KeyCode::Char('p') => app.toggle_play(Instant::now()),
        KeyCode::Char('n') => app.step_operation(),
        KeyCode::Char('R') => {
            app.restart();
            app.set_status_message("Restarted with simulation defaults".to_string());
        }

        // Device
        KeyCode::Char('g') => app.toggle_ghost(),

        // Source and health
        KeyCode::Char('s') => app.toggle_source(),
        KeyCode::Char('m') => app.toggle_health_mode(),
        KeyCode::Char(']') => app.cycle_manual_health(true),
        KeyCode::Char('[') => app.cycle_manual_health(false),

        // Reports
        KeyCode::Char('o') => app.start_path_input(),
        KeyCode::Char('r') => {
            let _ = app.reload_report();
        }

        // Overlays
        KeyCode::Char('?') => app.toggle_overlay(Overlay::Help),
        KeyCode::Char('a') => app.toggle_overlay(Overlay::About),
        KeyCode::Char('l') => app.toggle_overlay(Overlay::Lexicon),
        KeyCode::Char('t') => app.toggle_overlay(Overlay::Thresholds),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Slider keys on the Controls view. Returns true if the key was used.
fn handle_controls_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_control(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_control(),
        KeyCode::Left | KeyCode::Char('-') => app.nudge_control(-1),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => app.nudge_control(1),
        KeyCode::PageDown => app.nudge_control(-10),
        KeyCode::PageUp => app.nudge_control(10),
        _ => return false,
    }
    true
}

/// Handle key input while the path prompt is active
fn handle_path_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Open the typed path
        KeyCode::Enter => app.submit_path_input(),

        // Cancel (keep text but exit input mode)
        KeyCode::Esc => app.cancel_path_input(),

        // Clear the prompt
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.path_input.clear();
        }

        KeyCode::Backspace => app.path_pop(),

        // Type characters
        KeyCode::Char(c) => app.path_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel moves the slider selection
        MouseEventKind::ScrollUp if app.current_view == View::Controls => {
            app.select_prev_control();
        }
        MouseEventKind::ScrollDown if app.current_view == View::Controls => {
            app.select_next_control();
        }

        MouseEventKind::Down(MouseButton::Left) => {
            // Tab clicks (row 1, after header)
            if mouse.row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Device (0-10), Controls (11-23), Report (24-33)
                if col < 11 {
                    app.set_view(View::Device);
                } else if col < 24 {
                    app.set_view(View::Controls);
                } else if col < 34 {
                    app.set_view(View::Report);
                }
            }
        }

        // Right-click plays or pauses
        MouseEventKind::Down(MouseButton::Right) => app.toggle_play(Instant::now()),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DataSource, HealthMode};
    use crate::data::Control;
    use crate::settings::{Settings, ThemeChoice};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn app() -> App {
        let settings = Settings {
            theme: ThemeChoice::Dark,
            ..Settings::default()
        };
        App::new(&settings).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key_event(app, key(*code));
        }
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }

    #[test]
    fn test_view_switching() {
        let mut app = app();
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.current_view, View::Controls);
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.current_view, View::Report);
        press(&mut app, &[KeyCode::Right]);
        assert_eq!(app.current_view, View::Device);
        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.current_view, View::Report);
    }

    #[test]
    fn test_overlay_closes_on_any_key() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.overlay, Some(Overlay::Help));
        press(&mut app, &[KeyCode::Char('q')]);
        assert_eq!(app.overlay, None);
        assert!(app.running);
    }

    #[test]
    fn test_sliders_on_controls_view() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Down, KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.selected_control, Control::Power);
        assert_eq!(app.simulation.power, 95.0);
        assert_eq!(app.current_view, View::Controls);

        press(&mut app, &[KeyCode::Up, KeyCode::PageUp]);
        assert_eq!(app.simulation.temperature, 62.0);
    }

    #[test]
    fn test_playback_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char(' ')]);
        assert!(app.is_computing());
        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.current_index(), 1);
        press(&mut app, &[KeyCode::Char('R')]);
        assert!(!app.is_computing());
        assert_eq!(app.current_index(), 0);
    }

    #[test]
    fn test_toggles() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('g'), KeyCode::Char('m'), KeyCode::Char('s')]);
        assert!(!app.show_ghost);
        assert_eq!(app.health_mode, HealthMode::Manual);
        // No report loaded yet
        assert_eq!(app.data_source, DataSource::Simulation);
    }

    #[test]
    fn test_path_prompt_captures_keys() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('o'), KeyCode::Char('q'), KeyCode::Char('x')]);
        assert!(app.running);
        assert_eq!(app.path_input, "qx");
        press(&mut app, &[KeyCode::Backspace, KeyCode::Esc]);
        assert!(!app.path_input_active);
        assert_eq!(app.path_input, "q");
    }

    #[test]
    fn test_bad_path_reports_error() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('o')]);
        for c in "report.txt".chars() {
            press(&mut app, &[KeyCode::Char(c)]);
        }
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.load_error.as_deref(), Some("Please drop a .json file"));
        assert_eq!(app.path_input, "report.txt");
    }
}
