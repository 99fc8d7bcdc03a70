//! Polygon panel component
//!
//! Detail view for the selected population's shape: one line per vertex.
//! The panel implements `DetailView`, so the editor's selection router
//! pushes every settled selection change straight into it. Rendering then
//! reads the polygon itself from the editor each frame, which keeps vertex
//! edits visible without a second push path.

use crate::edit::DetailView;
use crate::sim::Polygon;
use crate::tui::app::App;
use crate::tui::components::{render_scrollbar, EditTarget, TextField};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, Scrollable, Selectable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Polygon panel component
pub struct PolygonPanel {
    /// Scroll state (manual: vertex lists don't stream)
    scroll: ScrollState,

    /// Selected vertex index
    pub selected: Option<usize>,

    /// Cached vertex count of the current polygon
    /// Public so App can sync it before delegating operations
    pub vertex_count: usize,
}

impl PolygonPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            selected: None,
            vertex_count: 0,
        }
    }

    /// Update with the current polygon's size (call each frame)
    pub fn sync(&mut self, vertex_count: usize, viewport_height: usize) {
        self.vertex_count = vertex_count;
        self.scroll.update_dimensions(vertex_count, viewport_height);

        // Clamp selection to valid range
        if let Some(idx) = self.selected {
            if idx >= vertex_count {
                self.selected = vertex_count.checked_sub(1);
            }
        }
    }

    /// Render the vertex list (internal implementation)
    #[allow(clippy::too_many_arguments)]
    pub fn render_with_polygon(
        &self,
        f: &mut Frame,
        area: Rect,
        polygon: Option<&Polygon>,
        row: Option<usize>,
        edit_field: Option<&TextField>,
        theme: &Theme,
        focused: bool,
    ) {
        let editing_new = matches!(edit_field.map(TextField::target), Some(EditTarget::NewVertex));
        let editing_style = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);

        let mut items: Vec<ListItem> = Vec::new();

        if let Some(polygon) = polygon {
            let (start, end) = self.scroll.visible_range();
            for (i, vertex) in polygon
                .vertices()
                .iter()
                .enumerate()
                .skip(start)
                .take(end - start)
            {
                // An open vertex editor replaces the line with the field buffer
                if let Some(field) = edit_field {
                    if matches!(field.target(), EditTarget::Vertex(v) if v == i) {
                        items.push(ListItem::new(Span::styled(
                            format!("{:>3}  {}", i, field.display()),
                            editing_style,
                        )));
                        continue;
                    }
                }

                let style = if focused && self.selected == Some(i) {
                    Style::default()
                        .fg(theme.selected_fg)
                        .bg(theme.selected_bg)
                        .add_modifier(Modifier::BOLD)
                } else if self.selected == Some(i) {
                    Style::default().fg(theme.fg).bg(theme.selected_bg)
                } else {
                    Style::default().fg(theme.fg)
                };
                items.push(ListItem::new(Span::styled(
                    format!("{:>3}  {}", i, vertex),
                    style,
                )));
            }

            // A pending new vertex renders as an extra line below the list
            if editing_new {
                if let Some(field) = edit_field {
                    items.push(ListItem::new(Span::styled(
                        format!("{:>3}  {}", polygon.len(), field.display()),
                        editing_style,
                    )));
                }
            } else if polygon.is_empty() {
                items.push(ListItem::new(Span::styled(
                    "  no vertices (press a to add)",
                    Style::default().fg(theme.dim),
                )));
            }
        } else {
            items.push(ListItem::new(Span::styled(
                "  no population selected",
                Style::default().fg(theme.dim),
            )));
        }

        let title = match (row, polygon) {
            (Some(row), Some(polygon)) => {
                let noun = if polygon.len() == 1 { "vertex" } else { "vertices" };
                format!(" Polygon (row {}, {} {}) ", row, polygon.len(), noun)
            }
            _ => " Polygon ".to_string(),
        };

        let border_style = if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );

        f.render_widget(list, area);

        render_scrollbar(
            f,
            area,
            self.scroll.total(),
            self.scroll.viewport(),
            self.scroll.offset(),
        );
    }
}

impl Default for PolygonPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView for PolygonPanel {
    /// Receive the polygon for a settled selection change (None when the
    /// selection clears). Resets vertex selection and scroll.
    fn show_detail(&mut self, polygon: Option<&Polygon>) {
        self.vertex_count = polygon.map(Polygon::len).unwrap_or(0);
        self.selected = if self.vertex_count > 0 { Some(0) } else { None };
        self.scroll.scroll_to_top();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for PolygonPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Polygon
    }
}

impl Scrollable for PolygonPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for PolygonPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index.min(self.vertex_count.saturating_sub(1)));
    }

    fn item_count(&self) -> usize {
        self.vertex_count
    }

    /// Override: pair selection movement with scrolling
    fn select_next(&mut self) {
        match self.selected {
            Some(idx) if idx + 1 < self.vertex_count => {
                self.selected = Some(idx + 1);
                self.scroll.scroll_down();
            }
            None if self.vertex_count > 0 => {
                self.selected = Some(0);
                self.scroll.scroll_to_top();
            }
            _ => {}
        }
    }

    /// Override: pair selection movement with scrolling
    fn select_previous(&mut self) {
        match self.selected {
            Some(idx) if idx > 0 => {
                self.selected = Some(idx - 1);
                self.scroll.scroll_up();
            }
            None if self.vertex_count > 0 => {
                self.selected = Some(self.vertex_count - 1);
                self.scroll.scroll_to_bottom();
            }
            _ => {}
        }
    }
}

impl Interactive for PolygonPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home => {
                self.scroll_to_top();
                if self.vertex_count > 0 {
                    self.selected = Some(0);
                }
                Handled::Yes
            }
            KeyCode::End => {
                self.scroll_to_bottom();
                if self.vertex_count > 0 {
                    self.selected = Some(self.vertex_count - 1);
                }
                Handled::Yes
            }
            KeyCode::Esc => {
                // Clear vertex selection if any
                if self.selected.is_some() {
                    self.selected = None;
                    Handled::Yes
                } else {
                    Handled::No // Nothing to clear, let App handle
                }
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:vertex  Enter:edit  a:add  d:remove")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Render Entry Point
// ═══════════════════════════════════════════════════════════════════════════

/// Render the polygon panel using the component owned by App
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let viewport = area.height.saturating_sub(2) as usize;
    let vertex_count = app.editor.current_polygon().map(Polygon::len).unwrap_or(0);
    let focused = app.is_focused(ComponentId::Polygon);

    // Sync dimensions with the current polygon
    app.polygon_panel.sync(vertex_count, viewport);

    app.polygon_panel.render_with_polygon(
        f,
        area,
        app.editor.current_polygon(),
        app.editor.current_index(),
        app.edit_field.as_ref(),
        &app.theme,
        focused,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Vec2;

    fn triangle() -> Polygon {
        Polygon::from_vertices(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(2.0, 3.0),
        ])
    }

    #[test]
    fn test_show_detail_resets_vertex_selection() {
        let mut panel = PolygonPanel::new();
        panel.selected = Some(2);

        let polygon = triangle();
        panel.show_detail(Some(&polygon));
        assert_eq!(panel.vertex_count, 3);
        assert_eq!(panel.selected, Some(0));

        panel.show_detail(None);
        assert_eq!(panel.vertex_count, 0);
        assert_eq!(panel.selected, None);
    }

    #[test]
    fn test_first_select_previous_starts_at_last_vertex() {
        let mut panel = PolygonPanel::new();
        panel.show_detail(Some(&triangle()));
        panel.selected = None;

        panel.select_previous();
        assert_eq!(panel.selected, Some(2));
    }

    #[test]
    fn test_sync_clamps_selection_after_vertex_removal() {
        let mut panel = PolygonPanel::new();
        panel.show_detail(Some(&triangle()));
        panel.selected = Some(2);

        panel.sync(2, 10);
        assert_eq!(panel.selected, Some(1));

        panel.sync(0, 10);
        assert_eq!(panel.selected, None);
    }
}
