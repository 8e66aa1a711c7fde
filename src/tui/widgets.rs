//! Custom widgets for the game UI

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A labelled gauge for credibility and turns
pub struct Meter {
    value: u32,
    max: u32,
    label: String,
    color: Color,
    /// Fill ratio at or below which the bar turns yellow
    warning_ratio: f32,
    /// Fill ratio at or below which the bar turns red
    danger_ratio: f32,
}

impl Meter {
    pub fn new(label: &str, value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max: max.max(1),
            label: label.to_string(),
            color: Color::Green,
            warning_ratio: 0.5,
            danger_ratio: 0.3,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn thresholds(mut self, warning: f32, danger: f32) -> Self {
        self.warning_ratio = warning;
        self.danger_ratio = danger;
        self
    }

    /// Count down instead of up: the bar shows what is left
    pub fn remaining(mut self) -> Self {
        self.value = self.max - self.value;
        self
    }

    fn ratio(&self) -> f32 {
        self.value as f32 / self.max as f32
    }

    fn current_color(&self) -> Color {
        let ratio = self.ratio();
        if ratio <= self.danger_ratio {
            Color::Red
        } else if ratio <= self.warning_ratio {
            Color::Yellow
        } else {
            self.color
        }
    }
}

impl Widget for Meter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = self.current_color();
        let label = format!("{} {}/{} ", self.label, self.value, self.max);
        buf.set_stringn(area.x, area.y, &label, area.width as usize, Style::default().fg(color));

        let used = label.chars().count() as u16;
        if used + 3 > area.width {
            return;
        }
        let bar_x = area.x + used;
        let bar_width = area.width - used - 2;
        let filled = (self.value as u64 * bar_width as u64 / self.max as u64) as u16;

        buf.set_string(bar_x, area.y, "[", Style::default());
        buf.set_string(bar_x + bar_width + 1, area.y, "]", Style::default());
        for x in 0..bar_width {
            let (symbol, style) = if x < filled {
                ("█", Style::default().fg(color))
            } else {
                ("░", Style::default().fg(Color::DarkGray))
            };
            buf.set_string(bar_x + 1 + x, area.y, symbol, style);
        }
    }
}

/// ASCII art box for dramatic moments
pub struct DramaticBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl DramaticBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for DramaticBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        // Double-line border
        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(area.x, bottom, "╚", style);
        buf.set_string(right, bottom, "╝", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        let title = format!(" {} ", self.title);
        let title_len = title.chars().count() as u16;
        if title_len + 2 <= area.width {
            buf.set_string(area.x + (area.width - title_len) / 2, area.y, &title, style);
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(area.x + 2, y, line, inner_width, Style::default().fg(Color::White));
        }
    }
}
