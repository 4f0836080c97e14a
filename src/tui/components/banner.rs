//! # Banner Component
//!
//! Static ASCII-art header drawn above the list.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const ART: &[&str] = &[
    r" _   _      _    _               ",
    r"| |_(_) ___| | _| |__   _____  __",
    r"| __| |/ __| |/ / '_ \ / _ \ \/ /",
    r"| |_| | (__|   <| |_) | (_) >  < ",
    r" \__|_|\___|_|\_\_.__/ \___/_/\_\",
];

pub struct Banner;

impl Banner {
    /// Rows needed: the art plus the version line.
    pub fn required_height() -> u16 {
        ART.len() as u16 + 1
    }
}

impl Component for Banner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let art_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = ART
            .iter()
            .map(|row| Line::from(Span::styled(*row, art_style)))
            .collect();
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
