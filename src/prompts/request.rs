pub fn get_request_prompt(name: &str, utterance: &str) -> String {
    format!(
        r#"Provide a brief, comforting, and biblically-based response to {name} who said: {utterance}
Address them by name ({name}) and keep it under 3 sentences. Focus on encouragement, faith, and God's love."#
    )
}
