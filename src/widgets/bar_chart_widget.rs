use crate::driver::Presenter;
use crate::sequence::{IndexSet, Value};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};

/// Snapshot of the last render call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartFrame {
    pub values: Vec<Value>,
    pub active: IndexSet,
    pub sorted: IndexSet,
}

/// How a single bar is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarHighlight {
    Active,
    Sorted,
    Plain,
}

/// Bar chart presenter. `render` only records the frame; drawing happens
/// when the terminal loop calls `draw`.
pub struct BarChartWidget {
    frame: ChartFrame,
    show_values: bool,
    renders: usize,
}

impl BarChartWidget {
    pub fn new(show_values: bool) -> Self {
        Self {
            frame: ChartFrame::default(),
            show_values,
            renders: 0,
        }
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    /// Number of frames received since creation
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn toggle_values(&mut self) {
        self.show_values = !self.show_values;
    }

    /// Active wins over sorted when a position is both
    pub fn highlight(&self, index: usize) -> BarHighlight {
        if self.frame.active.contains(&index) {
            BarHighlight::Active
        } else if self.frame.sorted.contains(&index) {
            BarHighlight::Sorted
        } else {
            BarHighlight::Plain
        }
    }

    /// Bar heights, shifted so the smallest value still gets a visible bar
    pub fn heights(&self) -> Vec<u64> {
        let floor = self.frame.values.iter().copied().min().unwrap_or(0).min(0);
        self.frame
            .values
            .iter()
            .map(|v| v.abs_diff(floor).saturating_add(1))
            .collect()
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, title: &str) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());

        let count = u16::try_from(self.frame.values.len())
            .unwrap_or(u16::MAX)
            .max(1);
        let inner_width = area.width.saturating_sub(2);
        let gap = if inner_width / count >= 3 { 1 } else { 0 };
        let bar_width = (inner_width.saturating_sub(gap * count) / count).max(1);

        let heights = self.heights();
        let bars: Vec<Bar> = self
            .frame
            .values
            .iter()
            .zip(heights)
            .enumerate()
            .map(|(idx, (value, height))| {
                let style = highlight_style(self.highlight(idx));
                let text = if self.show_values {
                    value.to_string()
                } else {
                    String::new()
                };
                Bar::default()
                    .value(height)
                    .text_value(text)
                    .style(style)
                    .value_style(style.add_modifier(Modifier::REVERSED))
                    .label(Line::from(idx.to_string()))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(gap);

        f.render_widget(chart, area);
    }
}

impl Presenter for BarChartWidget {
    fn render(&mut self, values: &[Value], active: &IndexSet, sorted: &IndexSet) {
        self.frame = ChartFrame {
            values: values.to_vec(),
            active: active.clone(),
            sorted: sorted.clone(),
        };
        self.renders += 1;
    }
}

pub fn highlight_style(highlight: BarHighlight) -> Style {
    match highlight {
        BarHighlight::Active => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        BarHighlight::Sorted => Style::default().fg(Color::Green),
        BarHighlight::Plain => Style::default().fg(Color::Cyan),
    }
}
