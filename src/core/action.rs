//! # Actions
//!
//! Everything that can happen in tickbox becomes an `Action`.
//! User presses Space? That's `Action::ToggleSelected`.
//! Storage confirms the write? That's `Action::Stored(outcome)`.
//!
//! `update()` never touches storage. A mutation is a round trip:
//!
//! ```text
//! ToggleSelected ─► update() ─► Effect::Store(SetCompleted)
//!                                     │  (loop runs the store call)
//!        Stored(CompletedSet) ◄───────┘  or StoreFailed(msg)
//!                │
//!                ▼
//!            update() ─► items changed
//! ```
//!
//! Because the list only changes once storage has confirmed, a failed call
//! leaves the in-memory list exactly as it was.

use log::debug;

use crate::core::state::App;
use crate::core::todo::Todo;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectPrevious,
    SelectNext,
    ToggleSelected,
    /// Text submitted from the add prompt.
    Add(String),
    /// Raw input submitted from the remove prompt (`*` or an index).
    Remove(String),
    /// Storage finished a request successfully.
    Stored(StoreOutcome),
    /// Storage request failed; carries the user-facing message.
    StoreFailed(String),
    Quit,
}

/// A single mutation for the storage gateway to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRequest {
    Insert { text: String },
    SetCompleted { id: i64, completed: bool },
    DeleteById { id: i64 },
    DeleteAll,
}

/// What storage reports back after a successful `StoreRequest`.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOutcome {
    Inserted(Todo),
    CompletedSet { id: i64, completed: bool },
    Deleted { id: i64 },
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Store(StoreRequest),
    Quit,
}

/// Parsed form of the remove prompt's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveTarget {
    All,
    Index(usize),
}

/// `*` removes everything; otherwise the input must be an index into a list
/// of `len` items. Surrounding whitespace is ignored.
pub fn parse_remove_target(input: &str, len: usize) -> Option<RemoveTarget> {
    let input = input.trim();
    if input == "*" {
        return Some(RemoveTarget::All);
    }
    input
        .parse::<usize>()
        .ok()
        .filter(|&index| index < len)
        .map(RemoveTarget::Index)
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SelectPrevious => {
            if app.selected > 0 {
                app.selected -= 1;
            }
            Effect::None
        }
        Action::SelectNext => {
            if app.selected + 1 < app.items.len() {
                app.selected += 1;
            }
            Effect::None
        }
        Action::ToggleSelected => match app.selected_todo() {
            Some(todo) => Effect::Store(StoreRequest::SetCompleted {
                id: todo.id,
                completed: !todo.completed,
            }),
            None => Effect::None,
        },
        Action::Add(text) => {
            if text.trim().is_empty() {
                debug!("Ignoring blank todo text");
                return Effect::None;
            }
            Effect::Store(StoreRequest::Insert { text })
        }
        Action::Remove(input) => match parse_remove_target(&input, app.items.len()) {
            Some(RemoveTarget::All) => Effect::Store(StoreRequest::DeleteAll),
            Some(RemoveTarget::Index(index)) => Effect::Store(StoreRequest::DeleteById {
                id: app.items[index].id,
            }),
            None => {
                debug!("Ignoring remove input {:?}", input);
                Effect::None
            }
        },
        Action::Stored(outcome) => {
            app.error = None;
            apply_outcome(app, outcome);
            Effect::None
        }
        Action::StoreFailed(message) => {
            app.status_message = String::from("Storage error");
            app.error = Some(message);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn apply_outcome(app: &mut App, outcome: StoreOutcome) {
    match outcome {
        StoreOutcome::Inserted(todo) => {
            app.status_message = format!("Added \"{}\"", todo.text);
            app.items.push(todo);
        }
        StoreOutcome::CompletedSet { id, completed } => {
            if let Some(todo) = app.items.iter_mut().find(|t| t.id == id) {
                todo.completed = completed;
                app.status_message = if completed {
                    format!("Marked done \"{}\"", todo.text)
                } else {
                    format!("Reopened \"{}\"", todo.text)
                };
            }
        }
        StoreOutcome::Deleted { id } => {
            if let Some(index) = app.items.iter().position(|t| t.id == id) {
                let removed = app.items.remove(index);
                app.status_message = format!("Removed \"{}\"", removed.text);
                app.clamp_selection();
            }
        }
        StoreOutcome::Cleared => {
            app.status_message = format!("Cleared {} items", app.items.len());
            app.items.clear();
            app.selected = 0;
        }
    }
}
