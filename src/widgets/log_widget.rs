use crate::utils::logging::{LogEntry, LogRingBuffer};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Panel showing the most recent log entries
pub struct LogWidget {
    buffer: LogRingBuffer,
}

impl LogWidget {
    pub fn new(buffer: LogRingBuffer) -> Self {
        Self { buffer }
    }

    /// Entries that fit in a panel of `height` rows (borders excluded)
    pub fn visible_entries(&self, height: u16) -> Vec<LogEntry> {
        self.buffer.get_recent(height.saturating_sub(2) as usize)
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .visible_entries(area.height)
            .iter()
            .map(|entry| {
                let color = match entry.level.as_str() {
                    "ERROR" => Color::Red,
                    "WARN" => Color::Yellow,
                    "INFO" => Color::White,
                    _ => Color::DarkGray,
                };
                Line::styled(entry.format_for_display(), Style::default().fg(color))
            })
            .collect();

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
        f.render_widget(paragraph, area);
    }
}
