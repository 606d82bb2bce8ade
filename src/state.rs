use tui_input::Input;

use crate::{
    types::{
        logs::Log,
        message::{ChatMessage, Role},
    },
    widgets::views::logs::LogsViewState,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("Please enter your name to continue")]
    EmptyName,

    #[error("Please share something before sending")]
    EmptyInput,
}

pub fn greeting(name: &str) -> String {
    format!("Peace be with you, {name}! 🙏 How can I encourage you today?")
}

/// Rejects blank input so it never reaches the resolver.
pub fn validate_utterance(raw: &str) -> Result<&str, StateError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(StateError::EmptyInput);
    }

    Ok(trimmed)
}

/// The user's name and the visible transcript for one session.
///
/// No name means the session is still at the name capture step.
#[derive(Debug, Default, Clone)]
pub struct ConversationState {
    user_name: Option<String>,
    messages: Vec<ChatMessage>,
}

impl ConversationState {
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn set_name(&mut self, raw: &str) -> Result<(), StateError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(StateError::EmptyName);
        }

        self.user_name = Some(name.to_string());
        self.new_conversation();

        Ok(())
    }

    pub fn push_user(&mut self, text: &str) {
        self.messages.push(ChatMessage::new(Role::User, text));
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.messages.push(ChatMessage::new(Role::Assistant, text));
    }

    /// Records the user's side of a turn and returns the text to resolve.
    ///
    /// The transcript shows the trimmed text; the resolver gets `raw` untouched so
    /// keywords with edge spaces still match at either end.
    pub fn begin_turn(&mut self, raw: &str) -> Result<String, StateError> {
        let trimmed = validate_utterance(raw)?;
        self.push_user(trimmed);

        Ok(raw.to_string())
    }

    /// Clears the transcript but keeps the name.
    pub fn new_conversation(&mut self) {
        self.messages.clear();

        if let Some(name) = &self.user_name {
            let text = greeting(name);
            self.messages.push(ChatMessage::new(Role::Assistant, &text));
        }
    }

    /// Clears the transcript and the name.
    pub fn change_name(&mut self) {
        self.user_name = None;
        self.messages.clear();
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    NameCapture,
    Chat,
    Logs,
}

impl View {
    /// Whether typing edits the input box in this view.
    pub fn accepts_input(self) -> bool {
        matches!(self, View::NameCapture | View::Chat)
    }
}

#[derive(Debug, Default, Clone)]
pub struct AppState {
    pub conversation: ConversationState,
    pub view: View,
    pub input: Input,

    /// Shown under the input until the next keystroke.
    pub warning: Option<String>,
    pub error: Option<String>,

    pub is_app_running: bool,

    /// Id of the turn being resolved. Cleared by resets so a late reply is dropped.
    pub pending_turn: Option<String>,

    pub logs_view: LogsViewState,
}

impl AppState {
    pub fn is_resolving(&self) -> bool {
        self.pending_turn.is_some()
    }

    pub fn log(&mut self, log: Log) {
        self.logs_view.logs.push(log);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let mut state = ConversationState::default();

        assert_eq!(state.set_name("   "), Err(StateError::EmptyName));
        assert_eq!(state.user_name(), None);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn setting_name_seeds_greeting() {
        let mut state = ConversationState::default();
        state.set_name("  Grace ").unwrap();

        assert_eq!(state.user_name(), Some("Grace"));
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::Assistant);
        assert_eq!(state.messages()[0].text, greeting("Grace"));
    }

    #[test]
    fn new_conversation_keeps_name() {
        let mut state = ConversationState::default();
        state.set_name("Grace").unwrap();
        state.push_user("I feel afraid");
        state.push_assistant("Do not fear.");

        state.new_conversation();

        assert_eq!(state.user_name(), Some("Grace"));
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].text, greeting("Grace"));
    }

    #[test]
    fn change_name_clears_everything() {
        let mut state = ConversationState::default();
        state.set_name("Grace").unwrap();
        state.push_user("hello");

        state.change_name();

        assert_eq!(state.user_name(), None);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn transcript_keeps_turn_order() {
        let mut state = ConversationState::default();
        state.set_name("Sam").unwrap();
        state.push_user("first");
        state.push_assistant("second");

        let roles: Vec<_> = state.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn turn_shows_trimmed_text_but_resolves_raw() {
        let mut state = ConversationState::default();
        state.set_name("Sam").unwrap();

        let utterance = state.begin_turn(" sad today ").unwrap();

        assert_eq!(utterance, " sad today ");
        assert_eq!(state.messages().last().unwrap().text, "sad today");
        assert_eq!(state.messages().last().unwrap().role, Role::User);
    }

    #[test]
    fn blank_turn_leaves_transcript_alone() {
        let mut state = ConversationState::default();
        state.set_name("Sam").unwrap();

        assert_eq!(state.begin_turn("   "), Err(StateError::EmptyInput));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn logs_view_ignores_typing() {
        assert!(View::NameCapture.accepts_input());
        assert!(View::Chat.accepts_input());
        assert!(!View::Logs.accepts_input());
    }

    #[test]
    fn utterance_validation() {
        assert_eq!(validate_utterance(" \t\n"), Err(StateError::EmptyInput));
        assert_eq!(validate_utterance("  I need hope "), Ok("I need hope"));
    }
}
