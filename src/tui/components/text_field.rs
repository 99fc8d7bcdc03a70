// Inline text field for cell and form editing
//
// One edit session at a time: App holds Option<TextField> and routes all
// keyboard input here while it is open. The target records where the text
// goes on commit, so Enter handling stays in one place.

use crate::edit::Column;

use super::piston_panel::PistonField;

/// Where a committed edit is applied
#[derive(Debug, Clone, Copy)]
pub enum EditTarget {
    /// A table cell: (row, column) in the population table
    Cell { row: usize, column: Column },
    /// A field of the piston form
    Piston(PistonField),
    /// An existing polygon vertex of the current row
    Vertex(usize),
    /// A vertex appended to the current row's polygon
    NewVertex,
}

/// A single-line text buffer being edited in place
#[derive(Debug, Clone)]
pub struct TextField {
    target: EditTarget,
    buffer: String,
}

impl TextField {
    /// Open a field over `target`, pre-filled with the current value
    pub fn new(target: EditTarget, initial: String) -> Self {
        Self {
            target,
            buffer: initial,
        }
    }

    /// Where this edit is applied on commit
    pub fn target(&self) -> EditTarget {
        self.target
    }

    /// Append a typed character (control characters are ignored)
    pub fn insert(&mut self, c: char) {
        if !c.is_control() {
            self.buffer.push(c);
        }
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Current buffer contents
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Buffer with a trailing cursor mark, for rendering
    pub fn display(&self) -> String {
        format!("{}▏", self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_ignores_control_characters() {
        let mut field = TextField::new(EditTarget::NewVertex, String::new());
        field.insert('1');
        field.insert('\t');
        field.insert('\u{1b}');
        field.insert('2');
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn test_backspace_edits_prefill() {
        let mut field = TextField::new(EditTarget::NewVertex, "3.5".to_string());
        field.backspace();
        field.insert('9');
        assert_eq!(field.text(), "3.9");
    }

    #[test]
    fn test_display_appends_cursor() {
        let field = TextField::new(EditTarget::NewVertex, "42".to_string());
        assert_eq!(field.display(), "42▏");
    }
}
