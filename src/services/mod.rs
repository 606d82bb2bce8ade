use async_trait::async_trait;

pub mod gemini;

/// Anything that can turn a prompt into free text. The resolver treats every
/// error variant the same way.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ResponderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("service returned no text (finish reason: {})", .finish_reason.as_deref().unwrap_or("none"))]
    EmptyResponse { finish_reason: Option<String> },
}
