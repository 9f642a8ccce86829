// Composition root and window/menu state
pub mod app;

// Desktop settings loaded from JSON
pub mod config;

// Rectangles, colors and the layout algorithms built on them
pub mod geometry;

// Input events and terminal event translation
#[path = "inputHandler/mod.rs"]
pub mod input_handler;

// Context menu, editors and info panels
pub mod popup;

// Window stack and taskbar
pub mod state;

// Drawing surface contract and its backends
pub mod surface;

use anyhow::{anyhow, Context};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub use app::Application;
pub use config::{ConfigError, DesktopConfig};
use geometry::Size;
use input_handler::{EventTranslator, InputEvent};
use surface::TerminalSurface;

/// Env var holding the tracing filter
pub const LOG_ENV: &str = "DESKWM_LOG";
const DEFAULT_LOG_FILTER: &str = "deskwm_lib=info";

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Log to a file: the terminal itself is the display
fn init_logging(config: &DesktopConfig) -> anyhow::Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {}", e))
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(e).context("entering alternate screen");
    }
    Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("leaving alternate screen")?;
    terminal.show_cursor().context("showing cursor")?;
    Ok(())
}

/// Pixel size of the whole terminal
fn display_size(terminal: &Tui, translator: &EventTranslator) -> anyhow::Result<Size> {
    let cells = terminal.size().context("querying terminal size")?;
    let (width, height) = translator.terminal_pixels(cells.width, cells.height);
    Ok(Size::new(width, height))
}

/// A terminal resize only moves the display size; the desktop follows it
/// through the fullscreen/windowed rules. Everything else is translated.
fn route_terminal_event(
    raw: Event,
    translator: &EventTranslator,
    app: &mut Application,
) -> Option<InputEvent> {
    if let Event::Resize(columns, rows) = raw {
        let (width, height) = translator.terminal_pixels(columns, rows);
        app.set_display_size(Size::new(width, height));
        return None;
    }
    translator.translate(raw)
}

/// Everything pending right now, waiting up to `timeout` for the first event
fn drain_events(
    translator: &EventTranslator,
    app: &mut Application,
    timeout: Duration,
) -> anyhow::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    if !event::poll(timeout)? {
        return Ok(events);
    }
    loop {
        let raw = event::read().context("reading terminal event")?;
        if let Some(event) = route_terminal_event(raw, translator, app) {
            events.push(event);
        }
        if !event::poll(Duration::ZERO)? {
            return Ok(events);
        }
    }
}

fn run_loop(terminal: &mut Tui, config: &DesktopConfig) -> anyhow::Result<()> {
    let metrics = config.metrics();
    let translator = EventTranslator::new(metrics);
    let display = display_size(terminal, &translator)?;
    let mut app = Application::new(config, display);
    let interval = config.frame_interval();

    while app.is_running() {
        for event in drain_events(&translator, &mut app, interval)? {
            app.handle_event(&event);
            if !app.is_running() {
                break;
            }
        }
        if !app.is_running() {
            break;
        }
        app.update();

        terminal
            .draw(|frame| {
                let area = frame.area();
                let screen = app.screen().size;
                let mut surface = TerminalSurface::new(frame.buffer_mut(), area, metrics, screen);
                app.draw(&mut surface);
            })
            .context("drawing frame")?;
    }

    match serde_json::to_string(&app.snapshot()) {
        Ok(json) => debug!("[Host] final desktop {}", json),
        Err(e) => warn!("[Host] could not serialize final desktop: {}", e),
    }
    Ok(())
}

/// Load config, install logging, take over the terminal and run until quit.
/// The terminal is restored whether or not the loop fails.
pub fn run() -> anyhow::Result<()> {
    let config = DesktopConfig::from_env().context("loading desktop config")?;
    init_logging(&config)?;
    info!("[Host] starting with {:?}", config);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &config);
    let restored = restore_terminal(&mut terminal);
    info!("[Host] stopped");
    result.and(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use surface::MonospaceMetrics;

    #[test]
    fn test_terminal_resize_keeps_windowed_size_for_fullscreen_toggle() {
        let translator = EventTranslator::new(MonospaceMetrics::new(8, 16));
        let mut app = Application::new(&DesktopConfig::default(), Size::new(1600, 1200));

        let routed = route_terminal_event(Event::Resize(240, 75), &translator, &mut app);
        assert!(routed.is_none());
        assert_eq!(app.screen().size, Size::new(800, 600));

        app.handle_event(&InputEvent::ctrl('f'));
        assert_eq!(app.screen().size, Size::new(1920, 1200));
        app.handle_event(&InputEvent::ctrl('f'));
        assert_eq!(app.screen().size, Size::new(800, 600));
    }

    #[test]
    fn test_terminal_shrink_clips_windowed_desktop() {
        let translator = EventTranslator::new(MonospaceMetrics::new(8, 16));
        let mut app = Application::new(&DesktopConfig::default(), Size::new(1600, 1200));

        route_terminal_event(Event::Resize(60, 25), &translator, &mut app);
        assert_eq!(app.screen().size, Size::new(480, 400));
        route_terminal_event(Event::Resize(200, 50), &translator, &mut app);
        assert_eq!(app.screen().size, Size::new(800, 600));
    }
}
