//! # Todo Record
//!
//! One row of the `Todos` table as the rest of the app sees it.

/// A single list item.
///
/// `id` is assigned by storage on insert and never changes afterwards.
/// `text` is never blank: blank input is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Checkbox glyph for the list view.
    pub fn glyph(&self) -> &'static str {
        if self.completed { "[x]" } else { "[ ]" }
    }
}
