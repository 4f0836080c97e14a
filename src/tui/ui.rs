use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Banner, StatusBar, TodoList};
use crate::tui::TuiState;

/// Draw one frame: banner, list (with help line), status bar, and the
/// prompt overlay when one is open.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(Banner::required_height()), Min(3), Length(1)]);
    let [banner_area, list_area, status_area] = layout.areas(frame.area());

    Banner.render(frame, banner_area);

    TodoList::new(&app.items, app.selected, &mut tui.todo_list).render(frame, list_area);

    StatusBar::new(
        app.items.len(),
        app.completed_count(),
        app.status_message.clone(),
        app.error.clone(),
    )
    .render(frame, status_area);

    if let Some(ref mut prompt) = tui.prompt {
        let area = frame.area();
        prompt.render(frame, area);
    }
}
