use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Widget, Wrap},
};

use crate::{
    state::AppState,
    types::logs::{Log, LogLevel},
    widgets::{ACCENT, views::chat::render_tail},
};

#[derive(Default, Debug, Clone)]
pub struct LogsViewState {
    pub logs: Vec<Log>,
}

pub struct LogsViewWidget<'a> {
    state: &'a AppState,
}

impl<'a> LogsViewWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for LogsViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(Line::from(" Logs ".bold()).centered())
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT));

        let log_lines = self
            .state
            .logs_view
            .logs
            .iter()
            .map(|log| {
                let label = match log.level {
                    LogLevel::Info => "INFO",
                    LogLevel::Warn => "WARN",
                    LogLevel::Error => "ERROR",
                };

                let line = format!("{} [{label}] {}", log.timestamp.format("%H:%M:%S"), log.text);

                let style = match log.level {
                    LogLevel::Info => Style::default().fg(Color::Reset),
                    LogLevel::Warn => Style::default().fg(Color::Yellow),
                    LogLevel::Error => Style::default().fg(Color::Red),
                };

                Line::from(line).style(style)
            })
            .collect::<Vec<_>>();

        render_tail(log_lines, Wrap { trim: true }, block, area, buf);
    }
}
