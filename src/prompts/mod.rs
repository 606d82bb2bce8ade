use crate::prompts::{persona::get_persona_prompt, request::get_request_prompt};

pub mod persona;
pub mod request;

/// Prompt sent to the external responder when no verse matched.
pub fn get_encouragement_prompt(name: &str, utterance: &str) -> String {
    [
        get_persona_prompt().to_string(),
        get_request_prompt(name, utterance),
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_user_and_quotes_utterance() {
        let prompt = get_encouragement_prompt("Sam", "I lost my job today");

        assert!(prompt.starts_with(get_persona_prompt()));
        assert!(prompt.contains("response to Sam who said: I lost my job today"));
        assert!(prompt.contains("Address them by name (Sam)"));
        assert!(prompt.contains("under 3 sentences"));
    }
}
