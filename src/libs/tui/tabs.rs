use ratatui::prelude::*;

/// One-row tab strip, keyboard driven (Tab cycles, no mouse).
pub fn draw_tab_strip(f: &mut Frame, area: Rect, labels: &[&str], active: usize) {
    let widths: Vec<Constraint> = labels
        .iter()
        .map(|s| Constraint::Length(s.chars().count() as u16 + 4))
        .collect();

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);

    for (i, rect) in row.iter().copied().enumerate() {
        let is_active = active == i;
        let fg = if is_active { Color::Cyan } else { Color::White };
        let style = Style::default().fg(fg).add_modifier(if is_active {
            Modifier::BOLD | Modifier::UNDERLINED
        } else {
            Modifier::empty()
        });
        let p = ratatui::widgets::Paragraph::new(Line::from(Span::styled(
            format!(" {} ", labels[i]),
            style,
        )))
        .alignment(Alignment::Center);
        f.render_widget(p, rect);
    }
}
