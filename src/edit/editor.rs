//! The population editor: structural edits bracketed by router suppression.

use tracing::debug;

use crate::sim::{Polygon, Population};

use super::delegates::{self, CommitError};
use super::router::{DetailView, SelectionRouter};
use super::table::{Column, PopulationTable};

/// Master-detail editor for a scene's populations.
///
/// Owns the table and the selection router. The router sits in an `Option`
/// slot that acts as the subscription: every structural mutation takes the
/// router out, applies its table edits (whose selection notifications then
/// find no subscriber), pushes the settled state to the detail panel exactly
/// once, and puts the router back. Detaching rather than flag-checking means
/// a notification raised mid-mutation cannot reach the router at all.
pub struct PopulationEditor {
    table: PopulationTable,
    router: Option<SelectionRouter>,
}

impl PopulationEditor {
    pub fn new() -> Self {
        Self {
            table: PopulationTable::new(),
            router: Some(SelectionRouter::new()),
        }
    }

    pub fn table(&self) -> &PopulationTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Row currently driving the detail panel, as last derived by the
    /// router from the table's selection.
    pub fn current_index(&self) -> Option<usize> {
        self.router.as_ref().and_then(|router| router.current())
    }

    pub fn current_polygon(&self) -> Option<&Polygon> {
        self.current_index().and_then(|row| self.table.polygon(row))
    }

    /// Mutable access to the current row's polygon, for vertex edits in the
    /// detail panel. Vertex edits touch neither rows nor selection, so no
    /// routing is involved.
    pub fn current_polygon_mut(&mut self) -> Option<&mut Polygon> {
        let row = self.current_index()?;
        self.table.polygon_mut(row)
    }

    // ── Selection commands ──────────────────────────────────────────────

    /// Select `row` and raise the selection-changed notification. User
    /// navigation comes through here; the structural operations below use
    /// it too and rely on the detach bracket to mute it.
    pub fn select_row(&mut self, row: usize, view: &mut dyn DetailView) {
        self.table.select_row(row);
        self.notify_selection_changed(view);
    }

    pub fn clear_selection(&mut self, view: &mut dyn DetailView) {
        self.table.clear_selection();
        self.notify_selection_changed(view);
    }

    /// The table's selection-changed notification: dispatched to the router
    /// only while one is attached.
    fn notify_selection_changed(&mut self, view: &mut dyn DetailView) {
        if let Some(router) = self.router.as_mut() {
            router.on_selection_changed(&self.table, view);
        }
    }

    // ── Structural operations ───────────────────────────────────────────

    /// Throw away every row and rebuild from `entries`. The first new row
    /// becomes current; an empty rebuild leaves nothing selected.
    pub fn replace_all(&mut self, entries: Vec<Population>, view: &mut dyn DetailView) {
        let mut router = self.router.take();

        self.table.clear();
        self.notify_selection_changed(view);
        for entry in entries {
            self.table.push_row(entry);
        }
        if self.table.is_empty() {
            self.clear_selection(view);
        } else {
            self.select_row(0, view);
        }

        if let Some(router) = router.as_mut() {
            router.on_selection_changed(&self.table, view);
        }
        self.router = router;
        debug!(rows = self.table.len(), "population list replaced");
    }

    /// Append one entry (row plus polygon together) and make it current.
    pub fn add(&mut self, entry: Population, view: &mut dyn DetailView) {
        let mut router = self.router.take();

        self.table.push_row(entry);
        self.select_row(self.table.len() - 1, view);

        if let Some(router) = router.as_mut() {
            router.on_selection_changed(&self.table, view);
        }
        self.router = router;
        debug!(rows = self.table.len(), "population added");
    }

    /// Delete the current row and its polygon, then let the router re-derive
    /// the current index from wherever the table moved its selection.
    /// Without a current row this is a silent no-op.
    pub fn remove(&mut self, view: &mut dyn DetailView) {
        let Some(row) = self.current_index() else {
            return;
        };

        let mut router = self.router.take();

        self.table.remove_row(row);
        self.notify_selection_changed(view);

        if let Some(router) = router.as_mut() {
            router.on_selection_changed(&self.table, view);
        }
        self.router = router;
        debug!(rows = self.table.len(), "population removed");
    }

    // ── Cell edits and export ───────────────────────────────────────────

    /// Validate and commit one edited cell through the column's delegate.
    /// A rejected edit leaves the previous value in place.
    pub fn commit_cell(
        &mut self,
        row: usize,
        column: Column,
        text: &str,
    ) -> Result<(), CommitError> {
        delegates::commit_cell(&mut self.table, row, column, text)
    }

    /// Export the populations as currently edited, in row order. Values
    /// come straight from the live entries, so in-place cell edits are
    /// reflected. An empty table exports an empty list.
    pub fn to_config(&self) -> Vec<Population> {
        self.table.entries().to_vec()
    }
}

impl Default for PopulationEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rgba, Vec2};

    /// Records every detail push so tests can see exactly what the panel
    /// would have displayed, and when.
    #[derive(Default)]
    struct RecordingView {
        calls: Vec<Option<Polygon>>,
    }

    impl DetailView for RecordingView {
        fn show_detail(&mut self, polygon: Option<&Polygon>) {
            self.calls.push(polygon.cloned());
        }
    }

    fn population(
        count: u32,
        radius: f64,
        mass: f64,
        speed: f64,
        color: Rgba,
        vertices: &[(f64, f64)],
    ) -> Population {
        Population {
            count,
            radius,
            mass,
            speed,
            color,
            polygon: Polygon::from_vertices(
                vertices.iter().map(|&(x, y)| Vec2::new(x, y)).collect(),
            ),
        }
    }

    fn two_entries() -> Vec<Population> {
        vec![
            population(5, 1.0, 2.0, 0.5, Rgba::RED, &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]),
            population(3, 2.0, 1.0, 1.0, Rgba::BLUE, &[(2.0, 2.0), (3.0, 2.0)]),
        ]
    }

    fn assert_selection_in_bounds(editor: &PopulationEditor) {
        if let Some(index) = editor.current_index() {
            assert!(index < editor.len());
        }
        assert_eq!(editor.table().selected(), editor.current_index());
    }

    #[test]
    fn test_replace_all_selects_first_row_or_nothing() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();

        editor.replace_all(two_entries(), &mut view);
        assert_eq!(editor.current_index(), Some(0));
        assert_eq!(editor.table().selected(), Some(0));

        editor.replace_all(Vec::new(), &mut view);
        assert_eq!(editor.current_index(), None);
        assert_eq!(editor.table().selected(), None);
        assert!(editor.to_config().is_empty());
    }

    #[test]
    fn test_rows_and_polygons_stay_aligned_through_edits() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        let entries = two_entries();

        editor.replace_all(entries.clone(), &mut view);
        assert_selection_in_bounds(&editor);

        let mut third = Population::stock();
        third.polygon.add_vertex(Vec2::new(9.0, 9.0));
        editor.add(third.clone(), &mut view);
        assert_selection_in_bounds(&editor);

        // Each row still carries the polygon it arrived with.
        let config = editor.to_config();
        assert_eq!(config.len(), 3);
        assert_eq!(config[0].polygon, entries[0].polygon);
        assert_eq!(config[1].polygon, entries[1].polygon);
        assert_eq!(config[2].polygon, third.polygon);

        // Removing the middle row keeps the outer pairs intact.
        editor.select_row(1, &mut view);
        editor.remove(&mut view);
        assert_selection_in_bounds(&editor);

        let config = editor.to_config();
        assert_eq!(config.len(), 2);
        assert_eq!(config[0].polygon, entries[0].polygon);
        assert_eq!(config[1].polygon, third.polygon);
    }

    #[test]
    fn test_add_makes_the_new_row_current() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();

        editor.add(Population::stock(), &mut view);
        assert_eq!(editor.current_index(), Some(0));

        editor.add(Population::stock(), &mut view);
        assert_eq!(editor.current_index(), Some(1));
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_remove_without_selection_changes_nothing() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();

        // Fresh editor: nothing selected, nothing to remove.
        editor.remove(&mut view);
        assert!(editor.is_empty());
        assert_eq!(editor.current_index(), None);
        assert!(view.calls.is_empty());

        // Rows present but selection cleared: still a no-op.
        editor.replace_all(vec![Population::stock()], &mut view);
        editor.clear_selection(&mut view);
        view.calls.clear();

        editor.remove(&mut view);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.current_index(), None);
        assert!(view.calls.is_empty());
    }

    #[test]
    fn test_remove_rederives_selection_from_the_table() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        let mut entries = two_entries();
        entries.push(population(1, 1.0, 1.0, 1.0, Rgba::GREEN, &[(5.0, 5.0)]));

        editor.replace_all(entries, &mut view);

        // Removing the last row clamps to the new last row.
        editor.select_row(2, &mut view);
        editor.remove(&mut view);
        assert_eq!(editor.current_index(), Some(1));

        // Removing everything ends with no selection.
        editor.remove(&mut view);
        editor.remove(&mut view);
        assert_eq!(editor.current_index(), None);
        assert!(editor.is_empty());

        // And removing again stays a no-op.
        editor.remove(&mut view);
        assert_eq!(editor.current_index(), None);
    }

    #[test]
    fn test_structural_mutations_push_only_the_settled_state() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        let entries = two_entries();

        // replace_all raises selection notifications while rebuilding
        // (clear, then select), but the detached router hears none of them:
        // the panel sees exactly one push, of the first row's polygon.
        editor.replace_all(entries.clone(), &mut view);
        assert_eq!(view.calls.len(), 1);
        assert_eq!(view.calls[0].as_ref(), Some(&entries[0].polygon));

        // add: one push, of the appended polygon.
        view.calls.clear();
        let mut third = Population::stock();
        third.polygon.add_vertex(Vec2::new(7.0, 7.0));
        editor.add(third.clone(), &mut view);
        assert_eq!(view.calls.len(), 1);
        assert_eq!(view.calls[0].as_ref(), Some(&third.polygon));

        // remove: one push, of the neighbor the selection moved to.
        view.calls.clear();
        editor.remove(&mut view);
        assert_eq!(view.calls.len(), 1);
        assert_eq!(view.calls[0].as_ref(), Some(&entries[1].polygon));

        // Emptying the table pushes the cleared state once per remove.
        view.calls.clear();
        editor.remove(&mut view);
        editor.remove(&mut view);
        assert_eq!(view.calls.len(), 2);
        assert_eq!(view.calls[1], None);
    }

    #[test]
    fn test_user_selection_routes_to_the_detail_panel() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        let entries = two_entries();
        editor.replace_all(entries.clone(), &mut view);
        view.calls.clear();

        editor.select_row(1, &mut view);
        assert_eq!(editor.current_index(), Some(1));
        assert_eq!(view.calls, vec![Some(entries[1].polygon.clone())]);

        editor.clear_selection(&mut view);
        assert_eq!(editor.current_index(), None);
        assert_eq!(view.calls.last().unwrap(), &None);
    }

    #[test]
    fn test_to_config_reflects_live_cell_edits() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        editor.replace_all(vec![Population::stock()], &mut view);

        editor.commit_cell(0, Column::Count, "25").unwrap();
        editor.commit_cell(0, Column::Speed, "3.5").unwrap();
        editor.commit_cell(0, Column::Color, "red").unwrap();

        let config = editor.to_config();
        assert_eq!(config[0].count, 25);
        assert_eq!(config[0].speed, 3.5);
        assert_eq!(config[0].color, Rgba::RED);
        // Untouched columns keep their stock values.
        assert_eq!(config[0].radius, 1.0);
    }

    #[test]
    fn test_full_editing_scenario() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        let entries = two_entries();

        editor.replace_all(entries.clone(), &mut view);
        assert_eq!(editor.to_config(), entries);

        editor.select_row(1, &mut view);
        assert_eq!(view.calls.last().unwrap().as_ref(), Some(&entries[1].polygon));
        assert_eq!(editor.current_polygon(), Some(&entries[1].polygon));

        editor.remove(&mut view);
        assert_eq!(editor.len(), 1);
        assert_eq!(editor.current_index(), Some(0));
        assert_eq!(editor.to_config(), vec![entries[0].clone()]);
    }

    #[test]
    fn test_vertex_edits_reach_the_stored_polygon() {
        let mut editor = PopulationEditor::new();
        let mut view = RecordingView::default();
        editor.replace_all(vec![Population::stock()], &mut view);

        editor
            .current_polygon_mut()
            .unwrap()
            .add_vertex(Vec2::new(1.0, 2.0));

        assert_eq!(editor.to_config()[0].polygon.vertices(), &[Vec2::new(1.0, 2.0)]);
    }
}
