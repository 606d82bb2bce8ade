pub const PERSONA_PROMPT: &str = "You are a Christian chatbot offering biblical encouragement, prayer support and spiritual guidance.";

pub fn get_persona_prompt() -> &'static str {
    PERSONA_PROMPT
}
