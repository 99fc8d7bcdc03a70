// Status bar component
//
// Renders scene facts at the bottom: file name, unsaved marker, population
// and particle totals, plus the key hint for the focused panel.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let dirty = if app.dirty { " [+]" } else { "" };

    let mut status_text = format!(
        " {}{} │ {} populations │ {} particles",
        app.scene_name(),
        dirty,
        app.editor.len(),
        app.particle_total(),
    );

    if let Some(hint) = app.focused_hint() {
        status_text.push_str(" │ ");
        status_text.push_str(hint);
    }

    status_text.push_str(" │ ?:help");

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
