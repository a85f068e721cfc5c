//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.list.editing().is_some() {
        "Enter: save | Esc: cancel | ←→: move cursor"
    } else {
        match app.focus {
            Focus::Input => "Enter: add | Tab: switch to list | Ctrl-C: quit",
            Focus::List => {
                "Space: toggle | e/Enter: edit | d: delete | ↑↓/jk: navigate | q: quit"
            }
        }
    };

    let counts = if app.list.is_hydrated() {
        format!("{} tasks, {} done", app.list.len(), app.list.completed_count())
    } else {
        "loading".to_string()
    };

    let mut spans = vec![
        Span::styled("Taskpad", theme::bold()),
        Span::raw(" | "),
        Span::raw(counts),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ];

    if let Some(notice) = &app.notice {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice.as_str(), theme::warning()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
