use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn color(self) -> Color {
        match self {
            ToastLevel::Info => Color::Gray,
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        }
    }
}

/// Bottom status line; carries the most recent toast until it expires.
pub fn draw_status(f: &mut Frame, area: Rect, text: &str, level: ToastLevel) {
    let p = Paragraph::new(Span::styled(text, Style::default().fg(level.color())))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}
