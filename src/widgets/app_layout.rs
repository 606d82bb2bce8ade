use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use crate::{
    state::{AppState, View},
    widgets::{
        header::Header,
        input_box::InputBox,
        status_line::StatusLine,
        views::{chat::ChatViewWidget, logs::LogsViewWidget, name_capture::NameCaptureViewWidget},
    },
};

pub struct AppLayout<'a> {
    state: &'a AppState,
}

pub struct AppAreas {
    pub header: Rect,
    pub body: Rect,
    pub input: Rect,
    pub status: Rect,
}

impl<'a> AppLayout<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub fn areas(area: Rect) -> AppAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(4),
                    Constraint::Fill(1),
                    Constraint::Length(3),
                    Constraint::Length(1),
                ]
                .as_ref(),
            )
            .split(area);

        AppAreas {
            header: chunks[0],
            body: chunks[1],
            input: chunks[2],
            status: chunks[3],
        }
    }
}

impl Widget for AppLayout<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = Self::areas(area);

        Header::new(self.state).render(areas.header, buf);

        match self.state.view {
            View::NameCapture => NameCaptureViewWidget::new(self.state).render(areas.body, buf),
            View::Chat => ChatViewWidget::new(self.state).render(areas.body, buf),
            View::Logs => LogsViewWidget::new(self.state).render(areas.body, buf),
        }

        let (title, placeholder) = match self.state.conversation.user_name() {
            None => ("Your Name", String::from("Enter your name here...")),
            Some(name) => ("Message", format!("Share your thoughts, {name}...")),
        };

        let enabled = !self.state.is_resolving() && self.state.view.accepts_input();

        InputBox::new(&self.state.input, title, placeholder, enabled).render(areas.input, buf);
        StatusLine::new(self.state).render(areas.status, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(state: &AppState) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        AppLayout::new(state).render(area, &mut buf);

        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn name_capture_screen() {
        let mut state = AppState::default();
        state.warning = Some(String::from("Please enter your name to continue"));

        let screen = render_to_string(&state);

        assert!(screen.contains("PRAISE THE LORD, DEAR!"));
        assert!(screen.contains("Enter your name here..."));
        assert!(screen.contains("Please enter your name to continue"));
    }

    #[test]
    fn chat_screen_shows_transcript() {
        let mut state = AppState::default();
        state.conversation.set_name("Grace").unwrap();
        state.conversation.push_user("I need hope");
        state.view = View::Chat;

        let screen = render_to_string(&state);

        assert!(screen.contains("PRAISE THE LORD, GRACE!"));
        assert!(screen.contains("I need hope"));
        assert!(screen.contains("Share your thoughts, Grace..."));
    }

    #[test]
    fn resolving_shows_spinner_text() {
        let mut state = AppState::default();
        state.conversation.set_name("Sam").unwrap();
        state.view = View::Chat;
        state.pending_turn = Some(String::from("turn"));

        assert!(render_to_string(&state).contains("Thinking of encouragement..."));
    }
}
