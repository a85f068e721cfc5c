//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::List && app.list.editing().is_none();

    let items: Vec<ListItem> = if app.list.is_hydrated() {
        app.list
            .tasks()
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let is_selected = idx == app.selected;

                let checkbox = if task.completed { "[x]" } else { "[ ]" };
                let text_style = if task.completed {
                    theme::completed()
                } else {
                    theme::normal()
                };

                let line = Line::from(vec![
                    Span::styled(checkbox, theme::dimmed()),
                    Span::raw(" "),
                    Span::styled(task.text.as_str(), text_style),
                ]);

                let style = if is_selected && is_focused {
                    theme::selected()
                } else {
                    theme::normal()
                };

                ListItem::new(line).style(style)
            })
            .collect()
    } else {
        vec![ListItem::new(Line::from(Span::styled(
            "Loading tasks...",
            theme::dimmed(),
        )))]
    };

    let block = Block::default()
        .title(Span::styled("Tasks", theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}
