// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Remove the population row at this index (and its polygon)
    RemoveRow(usize),
    /// Quit without saving
    QuitDiscard,
    /// Save the scene, then quit
    QuitSave,
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Confirm removing a population row
    /// Stores the index of the row to remove
    ConfirmRemove(usize),
    /// Confirm quitting with unsaved changes
    ConfirmQuit,
}

impl Modal {
    /// Create a help modal
    pub fn help() -> Self {
        Modal::Help
    }

    /// Create a remove confirmation for the given row
    pub fn confirm_remove(row: usize) -> Self {
        Modal::ConfirmRemove(row)
    }

    /// Create an unsaved-changes quit confirmation
    pub fn confirm_quit() -> Self {
        Modal::ConfirmQuit
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::ConfirmRemove(row) => match key {
                KeyCode::Char('y') | KeyCode::Enter => ModalAction::RemoveRow(*row),
                KeyCode::Char('n') | KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::ConfirmQuit => match key {
                KeyCode::Enter => ModalAction::QuitSave,
                KeyCode::Char('y') => ModalAction::QuitDiscard,
                KeyCode::Char('n') | KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_closes_on_escape_and_toggle() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('x')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
    }

    #[test]
    fn test_confirm_remove_carries_row_index() {
        let mut modal = Modal::confirm_remove(3);
        assert_eq!(
            modal.handle_input(KeyCode::Char('y')),
            ModalAction::RemoveRow(3)
        );
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::RemoveRow(3));
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
    }

    #[test]
    fn test_confirm_quit_distinguishes_save_and_discard() {
        let mut modal = Modal::confirm_quit();
        assert_eq!(modal.handle_input(KeyCode::Enter), ModalAction::QuitSave);
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::QuitDiscard);
        assert_eq!(modal.handle_input(KeyCode::Char('n')), ModalAction::Close);
    }
}
