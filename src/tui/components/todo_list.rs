//! # TodoList Component
//!
//! The list of todos with checkbox glyphs and the selection highlight.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TodoListState` lives in `TuiState` (scroll position survives frames)
//! - `TodoList` is created each frame with borrowed items and state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::todo::Todo;
use crate::tui::component::Component;

const HELP_TEXT: &str = " ↑↓ move  Space toggle  a add  r remove  q quit ";

#[derive(Default)]
pub struct TodoListState {
    pub list_state: ListState,
}

pub struct TodoList<'a> {
    items: &'a [Todo],
    selected: usize,
    state: &'a mut TodoListState,
}

impl<'a> TodoList<'a> {
    pub fn new(items: &'a [Todo], selected: usize, state: &'a mut TodoListState) -> Self {
        Self {
            items,
            selected,
            state,
        }
    }
}

impl Component for TodoList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(HELP_TEXT).centered())
            .padding(Padding::horizontal(1));

        if self.items.is_empty() {
            self.state.list_state.select(None);
            let empty = Paragraph::new("Nothing to do. Press a to add a todo.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let index_width = (self.items.len() - 1).to_string().len();
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, todo)| {
                let row_style = if i == self.selected {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                let glyph_color = if todo.completed { Color::Green } else { Color::Red };

                let line = Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", i, width = index_width),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(todo.glyph(), Style::default().fg(glyph_color)),
                    Span::raw(" "),
                    Span::raw(todo.text.as_str()),
                ]);
                ListItem::new(line).style(row_style)
            })
            .collect();

        // Selection drives scrolling only; the highlight is the row style above
        self.state.list_state.select(Some(self.selected));
        let list = List::new(rows).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
