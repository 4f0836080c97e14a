//! # Prompt Component
//!
//! Single-line text entry shown as a centered overlay when the user adds or
//! removes a todo.
//!
//! ## Responsibilities
//!
//! - Capture and echo text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter and `Cancel` on Esc
//!
//! The buffer is internal state; the prompt kind is a prop set by the parent
//! when the prompt opens. Blank submissions are passed through: deciding
//! what blank input means is the reducer's job, not the editor's.

mod cursor;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{
    BORDER_OFFSET, CursorState, clamp_to_u16, next_char_boundary, prev_char_boundary,
};

/// Which question the prompt is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Add,
    Remove,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Add => " Enter new todo ",
            PromptKind::Remove => " Enter index to remove or * to remove all ",
        }
    }
}

/// High-level events emitted by the Prompt
#[derive(Debug, Clone, PartialEq)]
pub enum PromptEvent {
    /// Enter pressed; carries the buffer as typed
    Submit(String),
    /// Esc pressed
    Cancel,
    ContentChanged,
}

pub struct Prompt {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// What is being asked (Prop)
    pub kind: PromptKind,
    cursor: CursorState,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            buffer: String::new(),
            kind,
            cursor: CursorState::new(),
        }
    }

    /// Width of the overlay for a given frame: the label plus some room, clamped to the frame.
    fn overlay_area(&self, area: Rect) -> Rect {
        let wanted = (self.kind.label().len() as u16 + 4).max(40);
        let width = wanted.min(area.width);
        let [_, row, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, center, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(row);
        center
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for Prompt {
    /// Draws over whatever is underneath `area`, centered.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = self.overlay_area(area);
        let inner_width = overlay.width.saturating_sub(2 * BORDER_OFFSET);
        self.cursor.update_scroll_offset(&self.buffer, inner_width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.kind.label());

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(Style::default().fg(Color::Green))
            .scroll((0, clamp_to_u16(self.cursor.scroll_offset)));

        frame.render_widget(Clear, overlay);
        frame.render_widget(input, overlay);

        let column = self
            .cursor
            .column(&self.buffer)
            .saturating_sub(self.cursor.scroll_offset);
        frame.set_cursor_position((
            overlay
                .x
                .saturating_add(BORDER_OFFSET)
                .saturating_add(clamp_to_u16(column)),
            overlay.y + BORDER_OFFSET,
        ));
    }
}

impl EventHandler for Prompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut encoded));
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // One line only: fold pasted line breaks into spaces
                let flattened: String = text
                    .trim_end_matches(['\r', '\n'])
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert_str(&flattened);
                Some(PromptEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(PromptEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => self
                .cursor
                .move_left(&self.buffer)
                .then_some(PromptEvent::ContentChanged),
            TuiEvent::CursorRight => self
                .cursor
                .move_right(&self.buffer)
                .then_some(PromptEvent::ContentChanged),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                PromptEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                PromptEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor.reset();
                Some(PromptEvent::Submit(text))
            }
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(prompt: &mut Prompt, s: &str) {
        for c in s.chars() {
            prompt.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_prompt_new() {
        let prompt = Prompt::new(PromptKind::Add);
        assert!(prompt.buffer.is_empty());
        assert_eq!(prompt.kind, PromptKind::Add);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut prompt = Prompt::new(PromptKind::Add);
        type_str(&mut prompt, "ab");
        assert_eq!(prompt.buffer, "ab");

        let res = prompt.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(PromptEvent::ContentChanged));
        assert_eq!(prompt.buffer, "a");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut prompt = Prompt::new(PromptKind::Add);
        type_str(&mut prompt, "ac");
        prompt.handle_event(&TuiEvent::CursorLeft);
        type_str(&mut prompt, "b");
        assert_eq!(prompt.buffer, "abc");

        prompt.handle_event(&TuiEvent::CursorHome);
        prompt.handle_event(&TuiEvent::Delete);
        assert_eq!(prompt.buffer, "bc");
    }

    #[test]
    fn test_submit_takes_buffer() {
        let mut prompt = Prompt::new(PromptKind::Add);
        type_str(&mut prompt, "Write report");

        let res = prompt.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(PromptEvent::Submit("Write report".to_string())));
        assert!(prompt.buffer.is_empty());
    }

    #[test]
    fn test_blank_submit_is_passed_through() {
        let mut prompt = Prompt::new(PromptKind::Remove);
        let res = prompt.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(PromptEvent::Submit(String::new())));
    }

    #[test]
    fn test_escape_cancels() {
        let mut prompt = Prompt::new(PromptKind::Remove);
        assert_eq!(prompt.handle_event(&TuiEvent::Escape), Some(PromptEvent::Cancel));
    }

    #[test]
    fn test_paste_is_flattened() {
        let mut prompt = Prompt::new(PromptKind::Add);
        prompt.handle_event(&TuiEvent::Paste("one\ntwo\n".to_string()));
        assert_eq!(prompt.buffer, "one two");
    }

    #[test]
    fn test_render_shows_label_and_text() {
        let backend = TestBackend::new(60, 5);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut prompt = Prompt::new(PromptKind::Add);
        type_str(&mut prompt, "Buy milk");

        terminal
            .draw(|f| {
                let area = f.area();
                prompt.render(f, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Enter new todo"));
        assert!(text.contains("Buy milk"));
    }

    #[test]
    fn test_huge_paste_renders() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut prompt = Prompt::new(PromptKind::Add);
        prompt.handle_event(&TuiEvent::Paste("a".repeat(70_000)));
        type_str(&mut prompt, "z");

        terminal
            .draw(|f| {
                let area = f.area();
                prompt.render(f, area);
            })
            .unwrap();

        assert_eq!(prompt.buffer.len(), 70_001);
        let res = prompt.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(PromptEvent::Submit(format!("{}z", "a".repeat(70_000)))));
    }
}
