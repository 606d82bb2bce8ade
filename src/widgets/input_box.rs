use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use tui_input::Input;

use crate::widgets::ACCENT;

pub struct InputBox<'a> {
    input: &'a Input,
    title: &'a str,
    placeholder: String,
    enabled: bool,
}

impl<'a> InputBox<'a> {
    pub fn new(input: &'a Input, title: &'a str, placeholder: String, enabled: bool) -> Self {
        Self {
            input,
            title,
            placeholder,
            enabled,
        }
    }

    /// Horizontal scroll needed to keep the cursor inside `area`.
    pub fn scroll(input: &Input, area: Rect) -> usize {
        let inner_width = area.width.saturating_sub(2) as usize;
        input.visual_scroll(inner_width.saturating_sub(1))
    }
}

impl Widget for InputBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.enabled { ACCENT } else { Color::DarkGray };
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::new().fg(border))
            .border_type(BorderType::Rounded);

        let paragraph = if self.input.value().is_empty() {
            Paragraph::new(self.placeholder).style(Style::new().fg(Color::DarkGray))
        } else {
            let scroll = Self::scroll(self.input, area);
            Paragraph::new(self.input.value()).scroll((0, scroll as u16))
        };

        paragraph.block(block).render(area, buf);
    }
}
