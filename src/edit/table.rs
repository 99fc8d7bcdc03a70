//! The population table: entry storage plus a typed five-column adapter.
//!
//! Rows and their polygon shapes live in one `Vec<Population>`, so a row and
//! its detail can never drift apart; the column accessors below read and
//! write only the scalar row fields.

use crate::sim::{Polygon, Population, Rgba};

/// The five editable columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Count,
    Radius,
    Mass,
    Speed,
    Color,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Count,
        Column::Radius,
        Column::Mass,
        Column::Speed,
        Column::Color,
    ];

    /// Header label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Radius => "radius",
            Self::Mass => "mass",
            Self::Speed => "speed",
            Self::Color => "color",
        }
    }

    /// Column to the right, wrapping at the end.
    pub fn next(&self) -> Column {
        match self {
            Self::Count => Self::Radius,
            Self::Radius => Self::Mass,
            Self::Mass => Self::Speed,
            Self::Speed => Self::Color,
            Self::Color => Self::Count,
        }
    }

    /// Column to the left, wrapping at the start.
    pub fn prev(&self) -> Column {
        match self {
            Self::Count => Self::Color,
            Self::Radius => Self::Count,
            Self::Mass => Self::Radius,
            Self::Speed => Self::Mass,
            Self::Color => Self::Speed,
        }
    }
}

/// Row storage with single-row selection.
///
/// Structural edits always move a row and its polygon together. Selection is
/// a row index or nothing; out-of-range selection commands are ignored.
#[derive(Debug, Default)]
pub struct PopulationTable {
    entries: Vec<Population>,
    selected: Option<usize>,
}

impl PopulationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, row: usize) -> Option<&Population> {
        self.entries.get(row)
    }

    pub fn entries(&self) -> &[Population] {
        &self.entries
    }

    pub fn polygon(&self, row: usize) -> Option<&Polygon> {
        self.entries.get(row).map(|e| &e.polygon)
    }

    pub fn polygon_mut(&mut self, row: usize) -> Option<&mut Polygon> {
        self.entries.get_mut(row).map(|e| &mut e.polygon)
    }

    // ── Typed column accessors ──────────────────────────────────────────

    pub fn count(&self, row: usize) -> Option<u32> {
        self.entries.get(row).map(|e| e.count)
    }

    pub fn radius(&self, row: usize) -> Option<f64> {
        self.entries.get(row).map(|e| e.radius)
    }

    pub fn mass(&self, row: usize) -> Option<f64> {
        self.entries.get(row).map(|e| e.mass)
    }

    pub fn speed(&self, row: usize) -> Option<f64> {
        self.entries.get(row).map(|e| e.speed)
    }

    pub fn color(&self, row: usize) -> Option<Rgba> {
        self.entries.get(row).map(|e| e.color)
    }

    pub fn set_count(&mut self, row: usize, value: u32) {
        if let Some(entry) = self.entries.get_mut(row) {
            entry.count = value;
        }
    }

    pub fn set_radius(&mut self, row: usize, value: f64) {
        if let Some(entry) = self.entries.get_mut(row) {
            entry.radius = value;
        }
    }

    pub fn set_mass(&mut self, row: usize, value: f64) {
        if let Some(entry) = self.entries.get_mut(row) {
            entry.mass = value;
        }
    }

    pub fn set_speed(&mut self, row: usize, value: f64) {
        if let Some(entry) = self.entries.get_mut(row) {
            entry.speed = value;
        }
    }

    pub fn set_color(&mut self, row: usize, value: Rgba) {
        if let Some(entry) = self.entries.get_mut(row) {
            entry.color = value;
        }
    }

    /// Cell contents as displayed and as offered to the edit field.
    pub fn cell_text(&self, row: usize, column: Column) -> Option<String> {
        let entry = self.entries.get(row)?;
        Some(match column {
            Column::Count => entry.count.to_string(),
            Column::Radius => entry.radius.to_string(),
            Column::Mass => entry.mass.to_string(),
            Column::Speed => entry.speed.to_string(),
            Column::Color => entry.color.name(),
        })
    }

    // ── Selection ───────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_row(&mut self, row: usize) {
        if row < self.entries.len() {
            self.selected = Some(row);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ── Structural edits ────────────────────────────────────────────────

    /// Append one entry. Selection is untouched.
    pub fn push_row(&mut self, entry: Population) {
        self.entries.push(entry);
    }

    /// Remove the entry at `row` and shift the selection the way a table
    /// widget does: selections past the removed row slide up, a selection
    /// on the removed row moves to the nearest remaining neighbor, and an
    /// emptied table has no selection.
    pub fn remove_row(&mut self, row: usize) -> Option<Population> {
        if row >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(row);
        self.selected = match self.selected {
            None => None,
            Some(s) if s < row => Some(s),
            Some(s) if s > row => Some(s - 1),
            Some(_) if self.entries.is_empty() => None,
            Some(_) => Some(row.min(self.entries.len() - 1)),
        };
        Some(removed)
    }

    /// Drop every entry and the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }
}
