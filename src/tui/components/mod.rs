// Components module - reusable UI building blocks
//
// Panels own their state; ui.rs lays them out and calls their render
// entry points:
// - Population panel: the master table of the editor
// - Polygon panel: vertex detail for the selected row
// - Piston panel: fixed five-field form
// - Logs panel: system log entries
// - Status bar and toast: shell components
//
// Each component is a focused, single-responsibility module.

pub mod logs_panel;
pub mod piston_panel;
pub mod polygon_panel;
pub mod population_panel;
pub mod status_bar;
pub mod text_field;
pub mod toast;

pub use text_field::{EditTarget, TextField};
pub use toast::Toast;

use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on a panel's right edge
///
/// Only renders if content exceeds the viewport.
pub fn render_scrollbar(f: &mut Frame, area: Rect, total: usize, viewport: usize, offset: usize) {
    if total <= viewport {
        return;
    }

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let content_length = total.saturating_sub(viewport);
    let mut scrollbar_state = ScrollbarState::new(content_length).position(offset);

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
