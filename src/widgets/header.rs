use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};

use crate::{state::AppState, widgets::ACCENT};

pub struct Header<'a> {
    state: &'a AppState,
}

impl<'a> Header<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let who = self
            .state
            .conversation
            .user_name()
            .map(str::to_uppercase)
            .unwrap_or(String::from("DEAR"));

        let lines = vec![
            Line::from(format!("PRAISE THE LORD, {who}!")).bold(),
            Line::from("MAY THE LORD GUIDE YOU!").dim(),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_style(Style::new().fg(ACCENT))
                    .border_type(BorderType::Rounded),
            )
            .render(area, buf);
    }
}
