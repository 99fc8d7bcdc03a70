// TUI application state
//
// This module manages the state of the TUI application: the population
// editor, the piston being edited, panel focus, the in-progress text edit,
// and UI state (modal, toast, theme).

use super::components::logs_panel::LogsPanel;
use super::components::piston_panel::PistonPanel;
use super::components::polygon_panel::PolygonPanel;
use super::components::population_panel::PopulationPanel;
use super::components::{EditTarget, TextField, Toast};
use super::input::InputHandler;
use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use super::traits::{ComponentId, Handled, Interactive};
use crate::config::Config;
use crate::edit::delegates::{self, CommitError};
use crate::edit::PopulationEditor;
use crate::logging::LogBuffer;
use crate::sim::{Piston, Population, Scene};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Main application state for the TUI
pub struct App {
    /// The population editor: master table plus selection routing
    pub editor: PopulationEditor,

    /// The scene's piston, edited directly by the piston form
    pub piston: Piston,

    /// Where the scene is saved (None when started without a file)
    pub scene_path: Option<PathBuf>,

    /// Whether there are unsaved changes
    pub dirty: bool,

    /// Save on quit without prompting (from config)
    autosave: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Panel that currently has input focus
    pub focused: ComponentId,

    /// Panel state (each component owns its scroll/cursor state)
    pub population_panel: PopulationPanel,
    pub polygon_panel: PolygonPanel,
    pub piston_panel: PistonPanel,
    pub logs_panel: LogsPanel,

    /// In-progress text edit; input routes here while one is open
    pub edit_field: Option<TextField>,

    /// Active modal overlay
    pub modal: Option<Modal>,

    /// Transient notification
    pub toast: Option<Toast>,

    /// Resolved theme colors
    pub theme: Theme,

    /// Which palette is active (shown in the help footer)
    pub theme_kind: ThemeKind,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    /// Input handler for flexible key behavior
    input_handler: InputHandler,
}

impl App {
    pub fn new(
        scene: Scene,
        path: Option<PathBuf>,
        config: &Config,
        log_buffer: LogBuffer,
    ) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);

        let mut app = Self {
            editor: PopulationEditor::new(),
            piston: scene.piston,
            scene_path: path,
            dirty: false,
            autosave: config.autosave,
            should_quit: false,
            focused: ComponentId::Populations,
            population_panel: PopulationPanel::new(),
            polygon_panel: PolygonPanel::new(),
            piston_panel: PistonPanel::new(),
            logs_panel: LogsPanel::new(),
            edit_field: None,
            modal: None,
            toast: None,
            theme: theme_kind.theme(),
            theme_kind,
            log_buffer,
            input_handler: InputHandler::default(),
        };

        // Load rows through the editor so the table and the polygon panel
        // start out aligned (first row selected when the scene has any)
        app.editor
            .replace_all(scene.populations, &mut app.polygon_panel);
        app
    }

    // ── Focus ───────────────────────────────────────────────────────────

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focused == id
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev_focus();
    }

    /// Key hint for the focused panel (shown in the status bar)
    pub fn focused_hint(&self) -> Option<&'static str> {
        match self.focused {
            ComponentId::Populations => self.population_panel.focus_hint(),
            ComponentId::Polygon => self.polygon_panel.focus_hint(),
            ComponentId::Piston => self.piston_panel.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
            _ => None,
        }
    }

    /// Route a key to the focused panel's local handler
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused {
            ComponentId::Populations => self.population_panel.handle_key(key),
            ComponentId::Polygon => self.polygon_panel.handle_key(key),
            ComponentId::Piston => self.piston_panel.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
            _ => Handled::No,
        }
    }

    // ── Input plumbing ──────────────────────────────────────────────────

    /// Handle a key press - returns true if the action should be triggered
    /// Uses the configured behavior for each key (state-change or repeatable)
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    /// Handle a key release
    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    // ── Toasts ──────────────────────────────────────────────────────────

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Drop the toast once it times out (called each frame)
    pub fn clear_expired_toast(&mut self) {
        if let Some(toast) = &self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    // ── Row selection ───────────────────────────────────────────────────
    //
    // Selection lives in the editor; every change here flows through its
    // router and lands in the polygon panel. Movement that would not change
    // the row is skipped so the detail panel is not re-pushed.

    pub fn select_next_row(&mut self) {
        let len = self.editor.len();
        if len == 0 {
            return;
        }
        match self.editor.current_index() {
            Some(i) if i + 1 < len => self.editor.select_row(i + 1, &mut self.polygon_panel),
            None => self.editor.select_row(0, &mut self.polygon_panel),
            _ => {}
        }
    }

    pub fn select_prev_row(&mut self) {
        let len = self.editor.len();
        if len == 0 {
            return;
        }
        match self.editor.current_index() {
            Some(i) if i > 0 => self.editor.select_row(i - 1, &mut self.polygon_panel),
            None => self.editor.select_row(len - 1, &mut self.polygon_panel),
            _ => {}
        }
    }

    pub fn select_first_row(&mut self) {
        if self.editor.len() > 0 && self.editor.current_index() != Some(0) {
            self.editor.select_row(0, &mut self.polygon_panel);
        }
    }

    pub fn select_last_row(&mut self) {
        let len = self.editor.len();
        if len > 0 && self.editor.current_index() != Some(len - 1) {
            self.editor.select_row(len - 1, &mut self.polygon_panel);
        }
    }

    pub fn clear_row_selection(&mut self) {
        if self.editor.current_index().is_some() {
            self.editor.clear_selection(&mut self.polygon_panel);
        }
    }

    // ── Structural edits ────────────────────────────────────────────────

    /// Append a stock population and select it
    pub fn add_population(&mut self) {
        self.editor
            .add(Population::stock(), &mut self.polygon_panel);
        self.dirty = true;
        info!("Added population row {}", self.editor.len() - 1);
    }

    /// Ask for confirmation before removing the current row
    pub fn request_remove_row(&mut self) {
        match self.editor.current_index() {
            Some(row) => self.modal = Some(Modal::confirm_remove(row)),
            None => self.show_toast("No row selected"),
        }
    }

    /// Remove the row the user confirmed in the modal
    pub fn remove_row_confirmed(&mut self, row: usize) {
        // Selection cannot move while the modal is open, but guard anyway
        if self.editor.current_index() == Some(row) {
            self.editor.remove(&mut self.polygon_panel);
            self.dirty = true;
            info!("Removed population row {}", row);
        }
    }

    // ── Text edits ──────────────────────────────────────────────────────

    /// Open the cell under the table cursor for editing
    pub fn open_cell_editor(&mut self) {
        let Some(row) = self.editor.current_index() else {
            self.show_toast("No row selected");
            return;
        };
        let column = self.population_panel.column;
        if let Some(text) = self.editor.table().cell_text(row, column) {
            self.edit_field = Some(TextField::new(EditTarget::Cell { row, column }, text));
        }
    }

    /// Open the piston field under the form cursor for editing
    pub fn open_piston_editor(&mut self) {
        let field = self.piston_panel.selected_field();
        let text = field.value_text(&self.piston);
        self.edit_field = Some(TextField::new(EditTarget::Piston(field), text));
    }

    /// Open the selected vertex for editing
    pub fn open_vertex_editor(&mut self) {
        let Some(index) = self.polygon_panel.selected else {
            self.show_toast("No vertex selected");
            return;
        };
        let Some(vertex) = self
            .editor
            .current_polygon()
            .and_then(|p| p.vertices().get(index).copied())
        else {
            return;
        };
        // Same `x, y` form the delegate parser accepts
        let text = format!("{}, {}", vertex.x, vertex.y);
        self.edit_field = Some(TextField::new(EditTarget::Vertex(index), text));
    }

    /// Open an empty field that will append a vertex on commit
    pub fn open_new_vertex_editor(&mut self) {
        if self.editor.current_index().is_none() {
            self.show_toast("No population selected");
            return;
        }
        self.edit_field = Some(TextField::new(EditTarget::NewVertex, String::new()));
    }

    /// Commit the open edit field. A rejected value keeps the field open
    /// and reports the reason in a toast; the model is never left with a
    /// partially applied edit.
    pub fn commit_edit_field(&mut self) {
        let Some(field) = self.edit_field.take() else {
            return;
        };

        let result = match field.target() {
            EditTarget::Cell { row, column } => self.editor.commit_cell(row, column, field.text()),
            EditTarget::Piston(piston_field) => {
                piston_field.commit(&mut self.piston, field.text())
            }
            EditTarget::Vertex(index) => self.commit_vertex(index, field.text()),
            EditTarget::NewVertex => self.commit_new_vertex(field.text()),
        };

        match result {
            Ok(()) => {
                self.dirty = true;
            }
            Err(err) => {
                warn!("Rejected edit: {}", err);
                self.show_toast(format!("✗ {}", err));
                self.edit_field = Some(field);
            }
        }
    }

    fn commit_vertex(&mut self, index: usize, text: &str) -> Result<(), CommitError> {
        let point = delegates::parse_point("vertex", text)?;
        if let Some(polygon) = self.editor.current_polygon_mut() {
            polygon.set_vertex(index, point);
        }
        Ok(())
    }

    fn commit_new_vertex(&mut self, text: &str) -> Result<(), CommitError> {
        let point = delegates::parse_point("vertex", text)?;
        if let Some(polygon) = self.editor.current_polygon_mut() {
            polygon.add_vertex(point);
            // Put the cursor on what was just added
            self.polygon_panel.selected = Some(polygon.len() - 1);
        }
        Ok(())
    }

    /// Discard the open edit field
    pub fn cancel_edit_field(&mut self) {
        self.edit_field = None;
    }

    /// Delete the selected vertex from the current polygon
    pub fn remove_selected_vertex(&mut self) {
        let Some(index) = self.polygon_panel.selected else {
            self.show_toast("No vertex selected");
            return;
        };
        if let Some(polygon) = self.editor.current_polygon_mut() {
            if polygon.remove_vertex(index).is_some() {
                self.dirty = true;
                // Keep the cursor on a valid vertex
                if polygon.is_empty() {
                    self.polygon_panel.selected = None;
                } else if index >= polygon.len() {
                    self.polygon_panel.selected = Some(polygon.len() - 1);
                }
            }
        }
    }

    // ── Saving and quitting ─────────────────────────────────────────────

    /// Write the scene to its path. Returns false (with a toast) when there
    /// is nowhere to save or the write fails.
    pub fn save_scene(&mut self) -> bool {
        let Some(path) = self.scene_path.clone() else {
            self.show_toast("✗ No scene path (start with a file argument)");
            return false;
        };

        let scene = Scene {
            populations: self.editor.to_config(),
            piston: self.piston.clone(),
        };

        match scene.save(&path) {
            Ok(()) => {
                self.dirty = false;
                info!("Saved scene to {}", path.display());
                self.show_toast(format!("✓ Saved {}", self.scene_name()));
                true
            }
            Err(err) => {
                error!("Save failed: {:#}", err);
                self.show_toast(format!("✗ Save failed: {}", err));
                false
            }
        }
    }

    /// Quit, prompting or autosaving when there are unsaved changes
    pub fn request_quit(&mut self) {
        if !self.dirty {
            self.should_quit = true;
        } else if self.autosave && self.scene_path.is_some() {
            if self.save_scene() {
                self.should_quit = true;
            }
        } else {
            self.modal = Some(Modal::confirm_quit());
        }
    }

    // ── Status bar facts ────────────────────────────────────────────────

    /// Scene file name for the status bar
    pub fn scene_name(&self) -> String {
        self.scene_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Total particles across all populations
    pub fn particle_total(&self) -> u64 {
        self.editor
            .table()
            .entries()
            .iter()
            .map(|p| p.count as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Column;

    fn test_app() -> App {
        App::new(Scene::sample(), None, &Config::default(), LogBuffer::new())
    }

    #[test]
    fn test_new_app_loads_scene_through_the_editor() {
        let scene = Scene::sample();
        let expected_rows = scene.populations.len();
        let first_polygon_len = scene.populations[0].polygon.len();

        let app = App::new(scene, None, &Config::default(), LogBuffer::new());

        assert_eq!(app.editor.len(), expected_rows);
        assert_eq!(app.editor.current_index(), Some(0));
        // The selection push reached the polygon panel
        assert_eq!(app.polygon_panel.vertex_count, first_polygon_len);
        assert_eq!(app.polygon_panel.selected, Some(0));
        assert!(!app.dirty);
    }

    #[test]
    fn test_commit_edit_field_applies_and_marks_dirty() {
        let mut app = test_app();
        app.edit_field = Some(TextField::new(
            EditTarget::Cell {
                row: 0,
                column: Column::Count,
            },
            "12".to_string(),
        ));

        app.commit_edit_field();

        assert!(app.edit_field.is_none());
        assert!(app.dirty);
        assert_eq!(app.editor.table().count(0), Some(12));
    }

    #[test]
    fn test_rejected_edit_keeps_the_field_open() {
        let mut app = test_app();
        app.edit_field = Some(TextField::new(
            EditTarget::Cell {
                row: 0,
                column: Column::Count,
            },
            "not a number".to_string(),
        ));

        app.commit_edit_field();

        assert!(app.edit_field.is_some());
        assert!(!app.dirty);
        assert!(app.toast.is_some());
    }

    #[test]
    fn test_new_vertex_commit_appends_and_selects() {
        let mut app = test_app();
        let before = app.editor.current_polygon().unwrap().len();

        app.edit_field = Some(TextField::new(EditTarget::NewVertex, "4, 5".to_string()));
        app.commit_edit_field();

        let polygon = app.editor.current_polygon().unwrap();
        assert_eq!(polygon.len(), before + 1);
        assert_eq!(app.polygon_panel.selected, Some(before));
        assert!(app.dirty);
    }

    #[test]
    fn test_remove_flow_requires_confirmation() {
        let mut app = test_app();
        let rows = app.editor.len();

        app.request_remove_row();
        assert!(matches!(app.modal, Some(Modal::ConfirmRemove(0))));

        app.modal = None;
        app.remove_row_confirmed(0);
        assert_eq!(app.editor.len(), rows - 1);
        assert!(app.dirty);
    }

    #[test]
    fn test_request_quit_prompts_only_when_dirty() {
        let mut app = test_app();
        app.request_quit();
        assert!(app.should_quit);

        let mut app = test_app();
        app.dirty = true;
        app.request_quit();
        assert!(!app.should_quit);
        assert!(matches!(app.modal, Some(Modal::ConfirmQuit)));
    }

    #[test]
    fn test_save_scene_writes_the_edited_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.scene");

        let mut app = test_app();
        app.scene_path = Some(path.clone());
        app.editor.commit_cell(0, Column::Count, "42").unwrap();
        app.dirty = true;

        assert!(app.save_scene());
        assert!(!app.dirty);

        let reloaded = Scene::load(&path).unwrap();
        assert_eq!(reloaded.populations[0].count, 42);
    }

    #[test]
    fn test_save_scene_without_a_path_fails_with_a_toast() {
        let mut app = test_app();
        assert!(!app.save_scene());
        assert!(app.toast.is_some());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_focus_cycle_skips_shell_components() {
        let mut app = test_app();
        assert!(app.is_focused(ComponentId::Populations));

        app.focus_next();
        assert!(app.is_focused(ComponentId::Polygon));

        app.focus_prev();
        assert!(app.is_focused(ComponentId::Populations));
    }
}
