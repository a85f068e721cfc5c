//! Terminal UI rendering.

pub mod edit_modal;
pub mod input_bar;
pub mod status_bar;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Input bar on top, task list in the middle, status bar at the bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    input_bar::render(frame, chunks[0], app);
    task_list::render(frame, chunks[1], app);
    status_bar::render(frame, chunks[2], app);

    // The edit surface is visible exactly when a draft is open.
    if app.list.editing().is_some() {
        edit_modal::render(frame, frame.area(), app);
    }
}

/// Centered rectangle of the given width/height within `area`, clamped
/// to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
