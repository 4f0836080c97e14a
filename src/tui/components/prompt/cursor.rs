//! Cursor position tracking for the single-line prompt.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll.
//! Methods take `buffer: &str` explicitly; the text itself is owned by
//! `Prompt`.

use unicode_width::UnicodeWidthStr;

/// Left and right border of the prompt block.
pub(super) const BORDER_OFFSET: u16 = 1;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Display columns scrolled off the left edge
    pub scroll_offset: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    pub fn move_left(&mut self, buffer: &str) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos = prev_char_boundary(buffer, self.pos);
        true
    }

    pub fn move_right(&mut self, buffer: &str) -> bool {
        if self.pos >= buffer.len() {
            return false;
        }
        self.pos = next_char_boundary(buffer, self.pos);
        true
    }

    /// Display width of the text left of the cursor.
    pub fn column(&self, buffer: &str) -> usize {
        buffer[..self.pos].width()
    }

    /// Keep the cursor inside a field `inner_width` columns wide.
    pub fn update_scroll_offset(&mut self, buffer: &str, inner_width: u16) {
        if inner_width == 0 {
            self.scroll_offset = 0;
            return;
        }
        let inner_width = usize::from(inner_width);
        let column = self.column(buffer);
        if column < self.scroll_offset {
            self.scroll_offset = column;
        } else if column >= self.scroll_offset + inner_width {
            self.scroll_offset = column + 1 - inner_width;
        }
    }
}

/// Terminal coordinates are `u16`; very long input saturates instead of wrapping.
pub(super) fn clamp_to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
