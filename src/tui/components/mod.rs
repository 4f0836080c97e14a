//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `Banner`: Static ASCII-art header
//! - `StatusBar`: Progress count plus status or error message
//!
//! ### Stateful Components
//!
//! - `TodoList`: Transient wrapper over `TodoListState` (scroll position)
//! - `Prompt`: Single-line editor that emits `PromptEvent`s
//!
//! Components receive external data as props, never by reaching into `App`
//! directly, so each one can be rendered against a `TestBackend` in
//! isolation.
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── banner.rs      (ASCII-art header)
//! ├── todo_list.rs   (checkbox list + help line)
//! ├── status_bar.rs  (progress + status/error)
//! └── prompt/        (add/remove text entry overlay)
//! ```

pub mod banner;
pub mod prompt;
pub mod status_bar;
pub mod todo_list;

pub use banner::Banner;
pub use prompt::{Prompt, PromptEvent, PromptKind};
pub use status_bar::StatusBar;
pub use todo_list::{TodoList, TodoListState};
