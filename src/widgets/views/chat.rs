use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::{state::AppState, types::message::Role, widgets::ACCENT};

pub struct ChatViewWidget<'a> {
    state: &'a AppState,
}

impl<'a> ChatViewWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn transcript_lines(&self) -> Vec<Line<'static>> {
        let conversation = &self.state.conversation;
        let name = conversation.user_name().unwrap_or_default();

        let mut lines = vec![
            Line::from(format!(
                "Welcome, {name}! I am here to provide biblical encouragement, prayer support, and spiritual guidance through God's word. 💖"
            ))
            .style(Style::new().fg(Color::Gray)),
            Line::from(format!(
                "📖 Personalized Bible verses  🙏 Prayer support for {name}  💖 Spiritual guidance  ✝ Faith-based comfort"
            ))
            .style(Style::new().fg(Color::Gray)),
            Line::from(""),
        ];

        for message in conversation.messages() {
            match message.role {
                Role::User => {
                    lines.push(Line::from(format!("[{name}]:")).style(Style::new().fg(ACCENT)));
                }
                Role::Assistant => {
                    lines.push(Line::from("[Bot]:").style(Style::new().fg(Color::Magenta)));
                }
            }

            for text_line in message.text.split('\n') {
                lines.push(Line::from(text_line.to_string()));
            }

            lines.push(Line::from(""));
        }

        lines
    }
}

/// Renders `lines` wrapped inside `block`, scrolled so the last wrapped row sits on
/// the bottom edge. Rows are counted with the same word wrapping the paragraph uses.
pub fn render_tail(
    lines: Vec<Line<'_>>,
    wrap: Wrap,
    block: Block<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    let inner = block.inner(area);
    let paragraph = Paragraph::new(lines).wrap(wrap);

    let rows = paragraph.line_count(inner.width);
    let offset = rows.saturating_sub(inner.height as usize);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    paragraph.scroll((offset, 0)).block(block).render(area, buf);
}

impl Widget for ChatViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let name = self.state.conversation.user_name().unwrap_or_default();
        let blessing = format!(" \"The LORD bless you and keep you, {name}\" - Numbers 6:24 ");

        let block = Block::bordered()
            .title(Line::from(" Conversation ".bold()).centered())
            .title_bottom(Line::from(blessing.italic()).centered())
            .border_style(Style::new().fg(ACCENT))
            .border_type(BorderType::Rounded);

        render_tail(
            self.transcript_lines(),
            Wrap { trim: false },
            block,
            area,
            buf,
        );
    }
}
