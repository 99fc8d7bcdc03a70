// UI rendering logic
//
// Builds the frame layout, dispatches to the panel render functions, then
// draws any modal overlay and toast on top.

use super::app::App;
use super::components::{logs_panel, piston_panel, polygon_panel, population_panel, status_bar};
use super::modal::Modal;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    // Apply theme background to the entire frame
    let bg = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg, f.area());

    // Split the terminal into three vertical sections:
    // - Main content area (fills remaining space)
    // - Logs panel (8 lines fixed)
    // - Status bar (2 lines: divider + text)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(8), // Logs
            Constraint::Length(2), // Status bar
        ])
        .split(f.area());

    // Main content: population table on the left, details on the right
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[0]);

    // Right column: polygon vertices on top, piston fields below
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(content[1]);

    population_panel::render(f, content[0], app);
    polygon_panel::render(f, right[0], app);
    piston_panel::render(f, right[1], app);
    logs_panel::render(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Render modal overlay (on top of everything)
    // Take modal temporarily to avoid borrow conflict with mutable app
    if let Some(modal) = app.modal.take() {
        render_modal(f, &modal, app);
        app.modal = Some(modal);
    }

    // Render toast notification (on top of modal too)
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}

/// Render a modal dialog as a centered overlay
fn render_modal(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::ConfirmRemove(row) => render_confirm_remove(f, app, *row),
        Modal::ConfirmQuit => render_confirm_quit(f, app),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    // Styles
    let key_style = Style::default().fg(app.theme.accent);
    let desc_style = Style::default().fg(app.theme.fg);
    let header_style = Style::default()
        .fg(app.theme.title)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("Tab", "Focus next panel"),
        kb("Shift+Tab", "Focus previous panel"),
        kb("↑/↓, j/k", "Select row / field"),
        kb("←/→, h/l", "Switch table column"),
        kb("Home/End", "Jump to first/last"),
        Line::raw(""),
        Line::from(Span::styled("  Editing", header_style)),
        kb("Enter", "Edit selected value"),
        kb("a", "Add population / vertex"),
        kb("d, Del", "Remove population / vertex"),
        kb("Esc", "Cancel edit / clear selection"),
        Line::raw(""),
        Line::from(Span::styled("  Scene", header_style)),
        kb("w", "Save scene"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?", "Toggle this help"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme_kind.name(), key_style),
        ]),
    ]);

    // Calculate modal size
    let width = 48;
    let height = 25;
    let area = centered_rect(width, height, f.area());

    // Clear the area behind the modal
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border_focused_style())
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the remove confirmation prompt
fn render_confirm_remove(f: &mut Frame, app: &App, row: usize) {
    let text = format!("Remove population {} and its polygon?", row);
    let width = (text.len() as u16 + 6).max(34);
    let area = centered_rect(width, 5, f.area());

    f.render_widget(Clear, area);

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(text, Style::default().fg(app.theme.fg))).centered(),
    ]);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.error_style())
                .title(" Confirm ")
                .title_bottom(Line::from(" y:remove  n:cancel ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the quit confirmation prompt shown when the scene has unsaved edits
fn render_confirm_quit(f: &mut Frame, app: &App) {
    let area = centered_rect(48, 5, f.area());

    f.render_widget(Clear, area);

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "Scene has unsaved changes.",
            Style::default().fg(app.theme.fg),
        ))
        .centered(),
    ]);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.error_style())
                .title(" Unsaved Changes ")
                .title_bottom(Line::from(" Enter:save & quit  y:discard  Esc:cancel ").centered()),
        );

    f.render_widget(paragraph, area);
}
