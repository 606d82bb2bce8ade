use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::{state::AppState, widgets::ACCENT};

pub struct NameCaptureViewWidget<'a> {
    state: &'a AppState,
}

impl<'a> NameCaptureViewWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for NameCaptureViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(""),
            Line::from("Welcome to God's comforting presence! 💖").bold(),
            Line::from(""),
            Line::from("Please enter your name so I can personalize our conversation:")
                .style(Style::new().fg(Color::Gray)),
        ];

        if let Some(warning) = &self.state.warning {
            lines.push(Line::from(""));
            lines.push(Line::from(warning.clone()).style(Style::new().fg(Color::Yellow)));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_style(Style::new().fg(ACCENT))
                    .border_type(BorderType::Rounded),
            )
            .render(area, buf);
    }
}
