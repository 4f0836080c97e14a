//! # Application State
//!
//! Core business state for tickbox. Domain data only; presentation state
//! (prompt mode, list scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── items: Vec<Todo>            // the list, in storage order
//! ├── selected: usize             // highlighted row (ignored when empty)
//! ├── status_message: String      // status bar text
//! └── error: Option<String>       // last storage failure, shown inline
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::todo::Todo;

pub struct App {
    pub items: Vec<Todo>,
    pub selected: usize,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(items: Vec<Todo>) -> Self {
        Self {
            items,
            selected: 0,
            status_message: String::from("Welcome to tickbox!"),
            error: None,
        }
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.items.get(self.selected)
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Pull `selected` back onto the last row after the list shrank.
    pub(crate) fn clamp_selection(&mut self) {
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_todos;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(Vec::new());
        assert_eq!(app.status_message, "Welcome to tickbox!");
        assert_eq!(app.selected, 0);
        assert!(app.error.is_none());
        assert!(app.selected_todo().is_none());
    }

    #[test]
    fn test_completed_count() {
        let mut app = App::new(sample_todos(3));
        app.items[1].completed = true;
        assert_eq!(app.completed_count(), 1);
    }

    #[test]
    fn test_clamp_selection() {
        let mut app = App::new(sample_todos(2));
        app.selected = 5;
        app.clamp_selection();
        assert_eq!(app.selected, 1);

        app.items.clear();
        app.clamp_selection();
        assert_eq!(app.selected, 0);
    }
}
