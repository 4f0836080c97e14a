//! # StatusBar Component
//!
//! One-line bar under the list showing progress and the latest status.
//!
//! ## Conditional Formatting
//!
//! 1. **Error**: `"tickbox | 1/3 done | database unreachable: ..."` with the
//!    message in red. Storage failures stay visible until the next
//!    successful write clears them.
//! 2. **Status message**: `"tickbox | 1/3 done | Added \"Buy milk\""`
//! 3. **Default**: `"tickbox | 1/3 done"`
//!
//! Stateless: all data arrives as props.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct StatusBar {
    pub total: usize,
    pub done: usize,
    pub status_message: String,
    pub error: Option<String>,
}

impl StatusBar {
    pub fn new(total: usize, done: usize, status_message: String, error: Option<String>) -> Self {
        Self {
            total,
            done,
            status_message,
            error,
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("tickbox", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" | {}/{} done", self.done, self.total)),
        ];

        if let Some(ref error) = self.error {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(bar: &mut StatusBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_status_bar_with_status_message() {
        let mut bar = StatusBar::new(3, 1, "Added \"Buy milk\"".to_string(), None);
        let text = render_text(&mut bar);
        assert!(text.contains("tickbox | 1/3 done | Added \"Buy milk\""));
    }

    #[test]
    fn test_status_bar_default_no_status() {
        let mut bar = StatusBar::new(0, 0, String::new(), None);
        let text = render_text(&mut bar);
        assert!(text.contains("tickbox | 0/0 done"));
        assert_eq!(text.matches('|').count(), 1);
    }

    #[test]
    fn test_error_wins_over_status() {
        let mut bar = StatusBar::new(
            2,
            0,
            "Storage error".to_string(),
            Some("database unreachable: refused".to_string()),
        );
        let text = render_text(&mut bar);
        assert!(text.contains("database unreachable: refused"));
        assert!(!text.contains("Storage error"));
    }
}
