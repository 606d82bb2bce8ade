use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::{
    state::{AppState, View},
    widgets::ACCENT,
};

pub struct StatusLine<'a> {
    state: &'a AppState,
}

struct Status {
    code: &'static str,
    active: bool,
    color: Color,
}

impl<'a> StatusLine<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn get_statuses(&self) -> Vec<Status> {
        vec![
            Status {
                code: "LLM",
                active: self.state.is_resolving(),
                color: ACCENT,
            },
            Status {
                code: "DATA",
                active: self.state.error.is_some(),
                color: Color::Red,
            },
            Status {
                code: "LOGS",
                active: self.state.view == View::Logs,
                color: ACCENT,
            },
        ]
    }

    fn get_message(&self) -> Option<(String, Color)> {
        if self.state.is_resolving() {
            return Some((String::from("Thinking of encouragement..."), ACCENT));
        }

        if let Some(warning) = &self.state.warning {
            return Some((warning.clone(), Color::Yellow));
        }

        if let Some(err) = &self.state.error {
            return Some((err.clone(), Color::Red));
        }

        None
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(8);

        for status in self.get_statuses() {
            let style = if status.active {
                Style::new().fg(Color::Black).bg(status.color)
            } else {
                Style::new().fg(Color::DarkGray)
            };

            spans.push(Span::styled(format!(" {} ", status.code), style));
        }

        spans.push(Span::raw(" "));

        match self.get_message() {
            Some((text, color)) => spans.push(Span::styled(text, Style::new().fg(color))),
            None => spans.push(Span::styled(
                "[Enter] send  [Ctrl+N] new  [Ctrl+R] name  [Tab] logs  [F5] reload  [Esc] quit",
                Style::new().fg(Color::DarkGray),
            )),
        }

        Line::from(spans).render(area, buf);
    }
}
