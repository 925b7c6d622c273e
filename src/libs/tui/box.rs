use ratatui::{
    layout::Margin,
    prelude::*,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

#[derive(Clone)]
pub struct BoxProps {
    pub border_color: Color,
    pub title: String,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            border_color: Color::LightBlue,
            title: "Panel".into(),
        }
    }
}

/// Rounded, titled panel sized to its lines (capped by `area`).
/// Returns the height actually used so callers can stack panels.
pub fn draw_box(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>, props: &BoxProps) -> u16 {
    let needed_h = (lines.len() as u16).saturating_add(2).max(3);
    let outer = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: needed_h.min(area.height),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(props.border_color))
        .title(Span::styled(
            format!(" {} ", props.title),
            Style::default()
                .fg(props.border_color)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(block, outer);

    let inner = outer.inner(Margin::new(1, 1));
    f.render_widget(Paragraph::new(lines), inner);
    outer.height
}
