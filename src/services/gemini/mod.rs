use async_trait::async_trait;

use crate::{
    config::Config,
    services::{
        Responder, ResponderError,
        gemini::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse},
    },
};

pub mod types;

pub struct GeminiService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiService {
    pub fn new(config: &Config) -> Result<Self, ResponderError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.trim().to_string(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl Responder for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, ResponderError> {
        if self.api_key.is_empty() {
            return Err(ResponderError::MissingCredential);
        }

        let body = GenerateContentRequest::from_prompt(prompt);

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();

            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => ResponderError::Api {
                    status: status.as_u16(),
                    message: err.error.message,
                },
                Err(_) => ResponderError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let response = resp.json::<GenerateContentResponse>().await?;

        response.text().ok_or_else(|| ResponderError::EmptyResponse {
            finish_reason: response.finish_reason().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
        sync::oneshot,
    };

    use super::*;

    /// Reads one HTTP request (headers plus a content-length body) off the socket.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw).to_string();
            let Some(header_end) = text.find("\r\n\r\n") else {
                continue;
            };

            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .map(|(_, value)| value.trim().parse::<usize>().unwrap())
                .unwrap_or(0);

            if raw.len() >= header_end + 4 + content_length {
                return text;
            }
        }

        String::from_utf8_lossy(&raw).to_string()
    }

    /// Serves a single canned response and hands back the request it received.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let _ = tx.send(request);
        });

        (format!("http://{addr}"), rx)
    }

    fn config(api_key: &str, base_url: &str) -> Config {
        Config {
            gemini_api_key: api_key.to_string(),
            gemini_model: String::from("gemini-pro"),
            gemini_base_url: base_url.to_string(),
            verses_path: String::from("verses.json"),
            request_timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn builds_endpoint() {
        let service =
            GeminiService::new(&config("key", "https://generativelanguage.googleapis.com/"))
                .unwrap();

        assert_eq!(
            service.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_without_request() {
        let service = GeminiService::new(&config("   ", "http://127.0.0.1:9")).unwrap();

        let err = service.generate("hello").await.unwrap_err();
        assert!(matches!(err, ResponderError::MissingCredential));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        let service = GeminiService::new(&config("key", "http://127.0.0.1:9")).unwrap();

        let err = service.generate("hello").await.unwrap_err();
        assert!(matches!(err, ResponderError::Http(_)));
    }

    #[tokio::test]
    async fn success_joins_candidate_text() {
        let (base_url, request) = serve_once(
            "200 OK",
            "application/json",
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Be strong, "}, {"text": "Sam."}]}, "finishReason": "STOP"}]}"#,
        )
        .await;
        let service = GeminiService::new(&config("key", &base_url)).unwrap();

        let reply = service.generate("hello").await.unwrap();
        assert_eq!(reply, "Be strong, Sam.");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-pro:generateContent "));
        assert!(request.to_lowercase().contains("x-goog-api-key: key"));
        assert!(request.contains(r#""text":"hello""#));
    }

    #[tokio::test]
    async fn error_body_is_reported_as_api_error() {
        let (base_url, _request) = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#,
        )
        .await;
        let service = GeminiService::new(&config("key", &base_url)).unwrap();

        match service.generate("hello").await.unwrap_err() {
            ResponderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_error_body_is_reported_as_status() {
        let (base_url, _request) =
            serve_once("500 Internal Server Error", "text/plain", "upstream exploded").await;
        let service = GeminiService::new(&config("key", &base_url)).unwrap();

        match service.generate("hello").await.unwrap_err() {
            ResponderError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn blocked_candidate_is_empty_response() {
        let (base_url, _request) = serve_once(
            "200 OK",
            "application/json",
            r#"{"candidates": [{"finishReason": "SAFETY"}]}"#,
        )
        .await;
        let service = GeminiService::new(&config("key", &base_url)).unwrap();

        let err = service.generate("hello").await.unwrap_err();
        assert!(matches!(
            &err,
            ResponderError::EmptyResponse { finish_reason: Some(reason) } if reason == "SAFETY"
        ));
        assert_eq!(err.to_string(), "service returned no text (finish reason: SAFETY)");
    }
}
