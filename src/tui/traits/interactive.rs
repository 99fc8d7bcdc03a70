//! Interactive trait for components that handle keyboard input
//!
//! Components that can receive and process keyboard events implement
//! this trait. The App routes input to the focused component first; keys
//! the component does not consume bubble up to the focus-specific
//! editing commands in the dispatch layer.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event or
/// if it should bubble up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

/// Trait for components that handle keyboard input
///
/// Panels consume the keys that move their own local state (selection
/// cursors, scroll position). Keys that edit shared state, such as the
/// population table itself, return `Handled::No` and are handled by the
/// App, which owns the editor.
pub trait Interactive: Component {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event,
    /// `Handled::No` if it should bubble up.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for the status bar while this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
