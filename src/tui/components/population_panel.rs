//! Population table panel
//!
//! The master table of the editor: one row per particle population, one
//! column per scalar field. Row selection lives in the editor because it
//! drives the polygon panel through the selection router; this panel owns
//! only presentation state (the active column and the scroll offset).

use crate::edit::Column;
use crate::tui::app::App;
use crate::tui::components::{render_scrollbar, EditTarget};
use crate::tui::traits::{Component, ComponentId, Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Population table panel state
pub struct PopulationPanel {
    /// Column the cell cursor is on
    pub column: Column,
    /// First visible row
    offset: usize,
}

impl PopulationPanel {
    pub fn new() -> Self {
        Self {
            column: Column::Count,
            offset: 0,
        }
    }

    /// Compute the visible row range, keeping the selected row in view.
    /// Stores the adjusted offset for the next frame.
    pub fn visible_range(
        &mut self,
        selected: Option<usize>,
        total: usize,
        height: usize,
    ) -> (usize, usize) {
        let height = height.max(1);

        if let Some(sel) = selected {
            if sel < self.offset {
                self.offset = sel;
            } else if sel >= self.offset + height {
                self.offset = sel + 1 - height;
            }
        }

        self.offset = self.offset.min(total.saturating_sub(height));
        let end = (self.offset + height).min(total);
        (self.offset, end)
    }
}

impl Default for PopulationPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PopulationPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Populations
    }
}

impl Interactive for PopulationPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.column = self.column.prev();
                Handled::Yes
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.column = self.column.next();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:row  ←→:column  Enter:edit  a:add  d:remove")
    }
}

/// Pad a cell to its column width (numbers right-aligned, color left)
fn pad_cell(text: &str, column: Column) -> String {
    match column {
        Column::Count => format!("{:>6} ", text),
        Column::Radius | Column::Mass | Column::Speed => format!("{:>9} ", text),
        Column::Color => format!("{:<12}", text),
    }
}

/// Render the population table using state owned by App
pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.is_focused(ComponentId::Populations);
    let selected = app.editor.current_index();
    let total = app.editor.len();

    // Two border rows plus one header row
    let height = area.height.saturating_sub(3) as usize;
    let (start, end) = app.population_panel.visible_range(selected, total, height);
    let active_column = app.population_panel.column;

    let theme = &app.theme;
    let table = app.editor.table();

    // Header row doubles as the cell cursor indicator
    let header = Line::from(
        Column::ALL
            .iter()
            .map(|col| {
                let style = if focused && *col == active_column {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme.label)
                };
                Span::styled(pad_cell(col.label(), *col), style)
            })
            .collect::<Vec<_>>(),
    );

    let mut items: Vec<ListItem> = vec![ListItem::new(header)];

    for row in start..end {
        let is_selected = selected == Some(row);
        let row_style = if is_selected && focused {
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default().fg(theme.fg).bg(theme.selected_bg)
        } else {
            Style::default().fg(theme.fg)
        };

        let mut spans: Vec<Span> = Vec::new();
        for col in &Column::ALL {
            // An open cell editor replaces the cell text with the field buffer
            if let Some(field) = &app.edit_field {
                if let EditTarget::Cell { row: er, column: ec } = field.target() {
                    if er == row && ec == *col {
                        spans.push(Span::styled(
                            pad_cell(&field.display(), *col),
                            Style::default()
                                .fg(theme.accent)
                                .add_modifier(Modifier::BOLD),
                        ));
                        continue;
                    }
                }
            }

            if *col == Column::Color {
                if let Some(color) = table.color(row) {
                    let swatch = Color::Rgb(color.r, color.g, color.b);
                    spans.push(Span::styled("■ ", row_style.fg(swatch)));
                    spans.push(Span::styled(format!("{:<10}", color.name()), row_style));
                    continue;
                }
            }

            let text = table.cell_text(row, *col).unwrap_or_default();
            spans.push(Span::styled(pad_cell(&text, *col), row_style));
        }

        items.push(ListItem::new(Line::from(spans)));
    }

    if total == 0 {
        items.push(ListItem::new(Span::styled(
            "  no populations (press a to add)",
            Style::default().fg(theme.dim),
        )));
    }

    let border_style = if focused {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(
                format!(" Populations ({}) ", total),
                theme.title_style(),
            )),
    );

    f.render_widget(list, area);

    render_scrollbar(f, area, total, height, start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_follows_selection() {
        let mut panel = PopulationPanel::new();
        // 10 rows, 4 visible
        assert_eq!(panel.visible_range(Some(0), 10, 4), (0, 4));
        // Selection below the window scrolls down just enough
        assert_eq!(panel.visible_range(Some(6), 10, 4), (3, 7));
        // Selection above the window jumps straight to it
        assert_eq!(panel.visible_range(Some(1), 10, 4), (1, 5));
    }

    #[test]
    fn test_visible_range_clamps_to_content() {
        let mut panel = PopulationPanel::new();
        assert_eq!(panel.visible_range(Some(9), 10, 4), (6, 10));
        // Shrinking content pulls the window back up
        assert_eq!(panel.visible_range(None, 3, 4), (0, 3));
    }

    #[test]
    fn test_column_cursor_wraps() {
        let mut panel = PopulationPanel::new();
        assert_eq!(panel.column, Column::Count);

        panel.handle_key(KeyEvent::from(KeyCode::Left));
        assert_eq!(panel.column, Column::Color);

        panel.handle_key(KeyEvent::from(KeyCode::Right));
        assert_eq!(panel.column, Column::Count);
    }

    #[test]
    fn test_unmapped_key_is_not_handled() {
        let mut panel = PopulationPanel::new();
        assert_eq!(panel.handle_key(KeyEvent::from(KeyCode::Char('x'))), Handled::No);
    }
}
