use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay listing key bindings and the highlight legend
pub struct HelpWidget {
    lines: Vec<Line<'static>>,
}

impl HelpWidget {
    pub fn new(entries: &[(String, &'static str)]) -> Self {
        let key_width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

        let mut lines = vec![Line::from(Span::styled(
            "Keys",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
        for (keys, description) in entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<width$}  ", keys, width = key_width),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(*description),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Bars",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("  yellow  ", Style::default().fg(Color::Yellow)),
            Span::raw("compared or moved by the last step"),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  green   ", Style::default().fg(Color::Green)),
            Span::raw("in its final position"),
        ]));

        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(70, 80, area);
        f.render_widget(Clear, popup);

        let paragraph = Paragraph::new(self.lines.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help (? to close) "),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, popup);
    }
}

/// Rect covering `percent_x` by `percent_y` of `area`, centered
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
