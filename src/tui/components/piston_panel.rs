//! Piston form panel
//!
//! A fixed five-field form for the scene's piston. Unlike the table panels
//! there is nothing to scroll or select from, just a field cursor; commits
//! go through the same delegate parsers as table cells.

use crate::edit::delegates::{self, CommitError};
use crate::sim::Piston;
use crate::tui::app::App;
use crate::tui::components::EditTarget;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// The piston form's fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PistonField {
    Position,
    Velocity,
    Mass,
    Color,
    Thickness,
}

impl PistonField {
    pub const ALL: [PistonField; 5] = [
        PistonField::Position,
        PistonField::Velocity,
        PistonField::Mass,
        PistonField::Color,
        PistonField::Thickness,
    ];

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::Mass => "mass",
            Self::Color => "color",
            Self::Thickness => "thickness",
        }
    }

    /// Current value as editable text. Points use the `x, y` form the
    /// delegate parser accepts, so a prefilled field commits unchanged.
    pub fn value_text(&self, piston: &Piston) -> String {
        match self {
            Self::Position => format!("{}, {}", piston.position.x, piston.position.y),
            Self::Velocity => format!("{}, {}", piston.velocity.x, piston.velocity.y),
            Self::Mass => piston.mass.to_string(),
            Self::Color => piston.color.name(),
            Self::Thickness => piston.thickness.to_string(),
        }
    }

    /// Parse `text` and store it in the piston. The piston is untouched
    /// when parsing fails.
    pub fn commit(&self, piston: &mut Piston, text: &str) -> Result<(), CommitError> {
        match self {
            Self::Position => piston.position = delegates::parse_point("position", text)?,
            Self::Velocity => piston.velocity = delegates::parse_point("velocity", text)?,
            Self::Mass => piston.mass = delegates::parse_positive("mass", text)?,
            Self::Color => piston.color = delegates::parse_color("color", text)?,
            Self::Thickness => piston.thickness = delegates::parse_positive("thickness", text)?,
        }
        Ok(())
    }
}

/// Piston form panel state
pub struct PistonPanel {
    /// Index of the field cursor (always < PistonField::ALL.len())
    pub selected: usize,
}

impl PistonPanel {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Field the cursor is on
    pub fn selected_field(&self) -> PistonField {
        PistonField::ALL[self.selected]
    }
}

impl Default for PistonPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PistonPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Piston
    }
}

impl Interactive for PistonPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < PistonField::ALL.len() {
                    self.selected += 1;
                }
                Handled::Yes
            }
            KeyCode::Home => {
                self.selected = 0;
                Handled::Yes
            }
            KeyCode::End => {
                self.selected = PistonField::ALL.len() - 1;
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:field  Enter:edit")
    }
}

/// Render the piston form using state owned by App
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.is_focused(ComponentId::Piston);
    let theme = &app.theme;
    let piston = &app.piston;

    let editing_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = PistonField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = i == app.piston_panel.selected;
            let (label_style, value_style) = if is_selected && focused {
                let s = Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD);
                (s, s)
            } else if is_selected {
                let s = Style::default().bg(theme.selected_bg);
                (s.fg(theme.label), s.fg(theme.fg))
            } else {
                (
                    Style::default().fg(theme.label),
                    Style::default().fg(theme.fg),
                )
            };

            let label = Span::styled(format!("  {:<10} ", field.label()), label_style);

            // An open editor replaces the value with the field buffer
            if let Some(edit) = &app.edit_field {
                if matches!(edit.target(), EditTarget::Piston(pf) if pf == *field) {
                    return ListItem::new(Line::from(vec![
                        label,
                        Span::styled(edit.display(), editing_style),
                    ]));
                }
            }

            let value_spans = match field {
                PistonField::Color => vec![
                    Span::styled(
                        "■ ",
                        value_style.fg(Color::Rgb(
                            piston.color.r,
                            piston.color.g,
                            piston.color.b,
                        )),
                    ),
                    Span::styled(piston.color.name(), value_style),
                ],
                _ => vec![Span::styled(field.value_text(piston), value_style)],
            };

            let mut spans = vec![label];
            spans.extend(value_spans);
            ListItem::new(Line::from(spans))
        })
        .collect();

    let border_style = if focused {
        theme.border_focused_style()
    } else {
        theme.border_style()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Piston "),
    );

    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rgba, Vec2};

    #[test]
    fn test_commit_parses_each_field_kind() {
        let mut piston = Piston::default();

        PistonField::Position.commit(&mut piston, "1.5, -2").unwrap();
        assert_eq!(piston.position, Vec2::new(1.5, -2.0));

        PistonField::Mass.commit(&mut piston, "80").unwrap();
        assert_eq!(piston.mass, 80.0);

        PistonField::Color.commit(&mut piston, "red").unwrap();
        assert_eq!(piston.color, Rgba::RED);
    }

    #[test]
    fn test_commit_rejects_bad_input_without_mutating() {
        let mut piston = Piston::default();
        let before = piston.clone();

        assert!(PistonField::Mass.commit(&mut piston, "-3").is_err());
        assert!(PistonField::Mass.commit(&mut piston, "abc").is_err());
        assert!(PistonField::Position.commit(&mut piston, "1.0").is_err());
        assert!(PistonField::Color.commit(&mut piston, "mauve").is_err());

        assert_eq!(piston, before);
    }

    #[test]
    fn test_prefill_text_commits_unchanged() {
        let mut piston = Piston::default();
        for field in PistonField::ALL {
            let text = field.value_text(&piston);
            field.commit(&mut piston, &text).unwrap();
        }
    }

    #[test]
    fn test_field_cursor_saturates_at_ends() {
        let mut panel = PistonPanel::new();

        panel.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(panel.selected_field(), PistonField::Position);

        panel.handle_key(KeyEvent::from(KeyCode::End));
        assert_eq!(panel.selected_field(), PistonField::Thickness);

        panel.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(panel.selected_field(), PistonField::Thickness);
    }
}
