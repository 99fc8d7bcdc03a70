// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, periodic redraws)
// - Layered key dispatch: modal, edit field, global keys, focused panel

pub mod app;
pub mod components;
pub mod input;
pub mod modal;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::sim::Scene;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use traits::{ComponentId, Handled};

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done. The scene path is kept so `w` can save back to the same file.
pub fn run(
    scene: Scene,
    path: Option<PathBuf>,
    config: Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Create app state with config (initializes theme, autosave behavior)
    let mut app = App::new(scene, path, &config, log_buffer);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Blocks on crossterm's event poll with a 200ms timeout so the UI still
/// redraws periodically (toast expiry) when no keys are pressed.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        if event::poll(Duration::from_millis(200)).context("Failed to poll for input")? {
            if let Event::Key(key_event) = event::read().context("Failed to read input")? {
                handle_key_event(app, key_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Edit field → Global → Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: An open edit field captures text entry
    if handle_edit_input(app, &key_event) {
        return;
    }

    // Layer 3: Global keys (quit, save, help, focus cycling)
    if handle_global_keys(app, &key_event) {
        return;
    }

    match key_event.kind {
        KeyEventKind::Press => {
            // Navigation keys - use state tracking for hold-to-repeat
            if !app.handle_key_press(key_event.code) {
                return;
            }

            // Let the focused panel consume the key first (column cursor,
            // vertex selection, piston field cursor)
            if app.dispatch_to_focused(key_event) == Handled::Yes {
                return;
            }

            // Panel passed - apply the app-level binding for the focused panel
            match app.focused {
                ComponentId::Populations => handle_population_keys(app, key_event.code),
                ComponentId::Polygon => handle_polygon_keys(app, key_event.code),
                ComponentId::Piston => handle_piston_keys(app, key_event.code),
                _ => {}
            }
        }
        KeyEventKind::Release => {
            app.handle_key_release(key_event.code);
        }
        _ => {}
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(ref mut modal) = app.modal else {
        return false;
    };

    // Always process Release events to keep InputHandler in sync.
    // Without this, keys get stuck in "pressed" state after modal closes.
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }
    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match modal.handle_input(key_event.code) {
        ModalAction::None => {}
        ModalAction::Close => {
            app.modal = None;
        }
        ModalAction::RemoveRow(row) => {
            app.modal = None;
            app.remove_row_confirmed(row);
        }
        ModalAction::QuitDiscard => {
            app.modal = None;
            app.should_quit = true;
        }
        ModalAction::QuitSave => {
            app.modal = None;
            if app.save_scene() {
                app.should_quit = true;
            }
        }
    }

    true // Modal absorbed the input
}

/// Handle text entry while an edit field is open - returns true if absorbed
///
/// Printable characters and Backspace go straight to the buffer. Enter and
/// Esc pass through the InputHandler so key repeat cannot double-commit.
fn handle_edit_input(app: &mut App, key_event: &KeyEvent) -> bool {
    if app.edit_field.is_none() {
        return false;
    }

    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return true;
    }
    if key_event.kind != KeyEventKind::Press {
        return true;
    }

    match key_event.code {
        KeyCode::Esc => {
            if app.handle_key_press(KeyCode::Esc) {
                app.cancel_edit_field();
            }
        }
        KeyCode::Enter => {
            if app.handle_key_press(KeyCode::Enter) {
                app.commit_edit_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = app.edit_field.as_mut() {
                field.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = app.edit_field.as_mut() {
                field.insert(c);
            }
        }
        _ => {}
    }

    true
}

/// Handle global keys - returns true if handled
/// Global keys work the same regardless of focused panel
/// Uses InputHandler for debounce (StateChange behavior = trigger once per press)
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if key_event.kind != KeyEventKind::Press {
        return false;
    }

    let key = key_event.code;

    match key {
        // Quit (prompts when the scene has unsaved edits)
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.request_quit();
            }
            true
        }
        // Save scene
        KeyCode::Char('w') | KeyCode::Char('W') => {
            if app.handle_key_press(key) {
                app.save_scene();
            }
            true
        }
        // Help modal
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::help());
            }
            true
        }
        // Panel focus cycling
        KeyCode::Tab => {
            if app.handle_key_press(key) {
                app.focus_next();
            }
            true
        }
        KeyCode::BackTab => {
            if app.handle_key_press(key) {
                app.focus_prev();
            }
            true
        }
        _ => false,
    }
}

/// Population table bindings that mutate app state rather than the panel
fn handle_population_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_row(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_row(),
        KeyCode::Home => app.select_first_row(),
        KeyCode::End => app.select_last_row(),
        KeyCode::Enter => app.open_cell_editor(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.add_population(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.request_remove_row(),
        KeyCode::Esc => app.clear_row_selection(),
        _ => {}
    }
}

/// Polygon panel bindings that need the editor or an edit field
fn handle_polygon_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.open_vertex_editor(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.open_new_vertex_editor(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.remove_selected_vertex(),
        _ => {}
    }
}

/// Piston form bindings
fn handle_piston_keys(app: &mut App, key: KeyCode) {
    if key == KeyCode::Enter {
        app.open_piston_editor();
    }
}
