// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, redraw ticks)
// - Routing physical keys to the keyboard mirror and the text field

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Redraw/expiry tick
const TICK: Duration = Duration::from_millis(50);

/// Run the TUI until the user quits. Returns the final field text.
pub async fn run_tui(
    config: Config,
    log_buffer: LogBuffer,
    initial_text: Option<String>,
) -> Result<String> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    if config.mouse {
        execute!(stdout, EnableMouseCapture).context("Failed to enable mouse capture")?;
    }
    let release_events = input::enable_release_reporting(&mut stdout);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, log_buffer, initial_text);
    app.release_events = release_events;
    tracing::info!(
        release_events,
        mouse = config.mouse,
        theme = app.theme_kind.name(),
        "keyboard started"
    );

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal: every step runs even if an earlier one failed
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    let screen = restore_screen(terminal.backend_mut(), release_events);
    let cursor = terminal.show_cursor().context("Failed to show cursor");
    raw?;
    screen?;
    cursor?;

    result?;
    tracing::info!(chars = app.field.len(), "keyboard stopped");
    Ok(crate::keyboard::EditTarget::value(&app.field).to_string())
}

/// Leave the alternate screen and release the mouse
///
/// Keyboard enhancement flags live on the alternate screen's stack, so they
/// are popped before leaving it. A failed pop is logged and does not stop
/// the screen from being restored.
fn restore_screen<W: Write>(out: &mut W, release_events: bool) -> Result<()> {
    if release_events {
        if let Err(e) = execute!(out, PopKeyboardEnhancementFlags) {
            tracing::warn!(error = %e, "failed to restore keyboard mode");
        }
    }
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to restore terminal")
}

/// Main event loop
///
/// Waits on terminal input and the redraw tick with tokio::select!,
/// whichever completes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(TICK);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick: expire highlights, redraw
            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: physical mirror → global keys → text field
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Layer 1: mirror the physical key onto rendered keys (single dispatcher)
    if let Some(name) = input::physical_key_name(key_event.code) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => app.physical_down(&name, Instant::now()),
            KeyEventKind::Release => app.physical_up(&name),
        }
    }

    if key_event.kind == KeyEventKind::Release {
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: native editing in the focused field
    if app.is_focused() {
        handle_field_keys(app, &key_event);
    }
}

/// Returns true if the key was a global command
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::F(2) => {
            app.toggle_logs();
            true
        }
        KeyCode::F(3) => {
            app.next_theme();
            true
        }
        KeyCode::Esc => {
            app.blur();
            true
        }
        _ => false,
    }
}

fn handle_field_keys(app: &mut App, key_event: &KeyEvent) {
    let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);
    let field = &mut app.field;

    match key_event.code {
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let c = input::typed_char(c, key_event.modifiers, key_event.state);
            field.insert(c.encode_utf8(&mut [0; 4]));
        }
        KeyCode::Enter => field.insert("\n"),
        KeyCode::Tab => field.insert("\t"),
        KeyCode::Backspace => field.delete_backward(),
        KeyCode::Delete => field.delete_forward(),
        KeyCode::Left => field.move_left(shift),
        KeyCode::Right => field.move_right(shift),
        KeyCode::Home => field.move_home(shift),
        KeyCode::End => field.move_end(shift),
        _ => {}
    }
}

/// Handle mouse input: left button drives pointer presses on keys
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_down(mouse_event.column, mouse_event.row)
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.pointer_drag(mouse_event.column, mouse_event.row)
        }
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(),
        _ => {}
    }
}
