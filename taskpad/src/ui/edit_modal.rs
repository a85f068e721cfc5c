//! Edit modal rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{centered_rect, theme};
use crate::app::App;

/// Render the centered edit modal over the rest of the screen.
///
/// Callers only invoke this while a draft is open; with no draft the
/// modal renders empty text, which never happens in practice.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let modal = centered_rect(area.width.saturating_mul(3) / 4, 5, area);

    let mut display_text = app
        .list
        .editing()
        .map(|d| d.text.clone())
        .unwrap_or_default();
    if app.edit_cursor >= display_text.len() {
        display_text.push('█');
    } else {
        display_text.insert(app.edit_cursor, '█');
    }

    let lines = vec![
        Line::from(Span::styled(display_text, theme::normal())),
        Line::from(""),
        Line::from(Span::styled("Enter: save | Esc: cancel", theme::dimmed())),
    ];

    let block = Block::default()
        .title("Edit Task")
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    frame.render_widget(Clear, modal);
    frame.render_widget(Paragraph::new(lines).block(block), modal);
}
