//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and carries out the
//! storage effects the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! ```text
//! draw ─► read key (blocks) ─► translate ─► update ─► Effect::Store?
//!  ▲                                                      │
//!  │                    storage call (blocks) ◄───────────┘
//!  └──── update(Stored | StoreFailed) ◄───────────────────┘
//! ```
//!
//! There is nothing to animate, so the loop redraws once per event and
//! otherwise sits in a blocking read. Storage calls are awaited inline:
//! while one is in flight, no keys are processed.

mod component;
mod components;
mod event;
mod ui;

pub use event::wait_for_key;

use log::{debug, info, warn};
use std::io::stdout;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;
use crate::core::todo::Todo;
use crate::storage::{self, TodoStore};
use crate::tui::component::EventHandler;
use crate::tui::components::{Prompt, PromptEvent, PromptKind, TodoListState};
use crate::tui::event::{TuiEvent, read_event};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub todo_list: TodoListState,
    /// Open add/remove prompt (None = browsing the list)
    pub prompt: Option<Prompt>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            todo_list: TodoListState::default(),
            prompt: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock // Only visible while a prompt is open
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Run the interactive loop until the user quits.
///
/// `items` is the list already loaded at startup. The terminal is restored
/// before returning, on success and on error alike.
pub async fn run(store: &dyn TodoStore, items: Vec<Todo>) -> std::io::Result<()> {
    let mut app = App::new(items);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();

    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &mut app, &mut tui, store).await,
        Err(e) => Err(e),
    };

    ratatui::restore();
    info!("Interactive loop finished with {} todos", app.items.len());
    result
}

async fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    store: &dyn TodoStore,
) -> std::io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw_ui(f, app, tui))?;

        let Some(event) = read_event()? else {
            continue;
        };
        let Some(action) = translate(tui, event) else {
            continue;
        };
        if dispatch(app, store, action).await {
            return Ok(());
        }
    }
}

/// Turn a terminal event into a core action, routing it through the open
/// prompt if there is one. Returns `None` for events that only affect
/// presentation state (or nothing at all).
pub fn translate(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    // Ctrl+C always quits regardless of mode
    if event == TuiEvent::ForceQuit {
        return Some(Action::Quit);
    }

    if let Some(ref mut prompt) = tui.prompt {
        let kind = prompt.kind;
        return match prompt.handle_event(&event)? {
            PromptEvent::Submit(text) => {
                tui.prompt = None;
                Some(match kind {
                    PromptKind::Add => Action::Add(text),
                    PromptKind::Remove => Action::Remove(text),
                })
            }
            PromptEvent::Cancel => {
                tui.prompt = None;
                None
            }
            PromptEvent::ContentChanged => None,
        };
    }

    match event {
        TuiEvent::CursorUp => Some(Action::SelectPrevious),
        TuiEvent::CursorDown => Some(Action::SelectNext),
        TuiEvent::InputChar(' ') => Some(Action::ToggleSelected),
        TuiEvent::InputChar('a' | 'A') => {
            tui.prompt = Some(Prompt::new(PromptKind::Add));
            None
        }
        TuiEvent::InputChar('r' | 'R') => {
            tui.prompt = Some(Prompt::new(PromptKind::Remove));
            None
        }
        TuiEvent::InputChar('q' | 'Q') => Some(Action::Quit),
        _ => None,
    }
}

/// Feed an action through the reducer, carrying out any storage effect and
/// feeding its outcome back in. Returns `true` when the loop should stop.
pub async fn dispatch(app: &mut App, store: &dyn TodoStore, action: Action) -> bool {
    let mut next = Some(action);
    while let Some(action) = next.take() {
        debug!("Dispatching {:?}", action);
        match update(app, action) {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Store(request) => {
                info!("Running {:?} against {} store", request, store.name());
                next = Some(match storage::execute(store, request).await {
                    Ok(outcome) => Action::Stored(outcome),
                    Err(e) => {
                        warn!("Storage request failed: {}", e);
                        Action::StoreFailed(e.to_string())
                    }
                });
            }
        }
    }
    false
}
