use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tensix_ghost::settings::ThemeChoice;
use tensix_ghost::{events, ui, App, Settings};

/// How often the watched report file is checked for rewrites.
const SOURCE_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "tensix-ghost")]
#[command(about = "Terminal Ghost that reacts to Tensix telemetry reports")]
struct Args {
    /// Telemetry report (.json) to open at startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (TOML). Defaults to ./ghost.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Time between playback steps (e.g., "500ms", "1s")
    #[arg(short, long)]
    tick: Option<String>,

    /// Color theme: auto, dark or light
    #[arg(long, value_parser = parse_theme)]
    theme: Option<ThemeChoice>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Validate a report, print its vitals and health as JSON, and exit
    #[arg(long, conflicts_with_all = ["file", "export"])]
    check: Option<PathBuf>,

    /// Export current state (--file or simulation) to JSON and exit
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn parse_theme(s: &str) -> Result<ThemeChoice, String> {
    match s.to_ascii_lowercase().as_str() {
        "auto" => Ok(ThemeChoice::Auto),
        "dark" => Ok(ThemeChoice::Dark),
        "light" => Ok(ThemeChoice::Light),
        other => Err(format!("unknown theme '{}' (expected auto, dark or light)", other)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(ref log_path) = args.log {
        init_logging(log_path)?;
    }

    // Resolve settings: defaults, config file, environment, then CLI
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(tick) = args.tick.clone() {
        settings.tick = tick;
        settings.tick_period().context("Invalid --tick")?;
    }
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }

    // Handle check mode (non-interactive)
    if let Some(ref report_path) = args.check {
        return check_report(report_path, &settings);
    }

    // Handle export mode (non-interactive)
    if let Some(ref export_path) = args.export {
        return export_to_file(args.file.as_deref(), export_path, &settings);
    }

    run_tui(args.file.as_deref(), &settings)
}

/// Install a file logger. Without one, nothing is logged, so the
/// alternate screen is never written over.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Validate a report and print what the Ghost would show for it.
fn check_report(path: &Path, settings: &Settings) -> Result<()> {
    let mut app = App::new(settings)?;
    app.open_report(path)
        .with_context(|| format!("Invalid report {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    Ok(())
}

/// Export the current state to a JSON file
fn export_to_file(report: Option<&Path>, export_path: &Path, settings: &Settings) -> Result<()> {
    let mut app = App::new(settings)?;
    if let Some(path) = report {
        app.open_report(path)
            .with_context(|| format!("Invalid report {}", path.display()))?;
    }
    app.export_state(export_path)?;
    println!("Exported state to: {}", export_path.display());
    Ok(())
}

/// Run the TUI, optionally starting from a report file
fn run_tui(report: Option<&Path>, settings: &Settings) -> Result<()> {
    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new(settings)?;
    if let Some(path) = report {
        // A bad file leaves the app in simulation mode with the error shown
        let _ = app.open_report(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    info!(source = app.source_description(), "starting TUI");

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let mut last_poll = Instant::now();

    while app.running {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout; the Ghost animates between keys
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        app.tick(Instant::now());

        // Pick up rewrites of the report file
        if last_poll.elapsed() >= SOURCE_POLL_INTERVAL {
            app.poll_source();
            last_poll = Instant::now();
        }
    }

    info!("exiting");
    Ok(())
}
