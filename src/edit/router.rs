//! Selection routing: table selection drives the polygon detail panel.

use crate::sim::Polygon;

use super::table::PopulationTable;

/// The detail-panel collaborator.
///
/// Receives the polygon of the newly current row whenever the selection
/// settles somewhere, or `None` when no row is selected. Implementations
/// decide what "display" means; the router never holds on to the reference.
pub trait DetailView {
    fn show_detail(&mut self, polygon: Option<&Polygon>);
}

/// Derives the current detail index from the table's live selection and
/// pushes the matching polygon to the detail panel.
///
/// The router is the editor's only subscriber to selection changes. While a
/// structural mutation is in flight the editor detaches it entirely, so a
/// notification raised mid-rebuild finds no one listening; see
/// [`super::editor::PopulationEditor`].
#[derive(Debug, Default)]
pub struct SelectionRouter {
    current: Option<usize>,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the row currently driving the detail panel, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// React to a selection change: recompute the current index from the
    /// table and show the matching polygon. The table is single-selection,
    /// so the selected row (when present) is the current row.
    pub fn on_selection_changed(&mut self, table: &PopulationTable, view: &mut dyn DetailView) {
        self.current = table.selected();
        view.show_detail(self.current.and_then(|row| table.polygon(row)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Population, Vec2};

    /// Test double that records every push from the router.
    #[derive(Default)]
    struct RecordingView {
        calls: Vec<Option<Polygon>>,
    }

    impl DetailView for RecordingView {
        fn show_detail(&mut self, polygon: Option<&Polygon>) {
            self.calls.push(polygon.cloned());
        }
    }

    #[test]
    fn test_router_follows_table_selection() {
        let mut table = PopulationTable::new();
        let mut entry = Population::stock();
        entry.polygon.add_vertex(Vec2::new(1.0, 2.0));
        table.push_row(Population::stock());
        table.push_row(entry.clone());

        let mut router = SelectionRouter::new();
        let mut view = RecordingView::default();

        table.select_row(1);
        router.on_selection_changed(&table, &mut view);
        assert_eq!(router.current(), Some(1));
        assert_eq!(view.calls.last().unwrap().as_ref(), Some(&entry.polygon));

        table.clear_selection();
        router.on_selection_changed(&table, &mut view);
        assert_eq!(router.current(), None);
        assert_eq!(view.calls.last().unwrap(), &None);
    }
}
