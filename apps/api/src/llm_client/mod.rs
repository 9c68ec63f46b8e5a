/// LLM Client — the single point of entry for all OpenAI calls in the Buddy Letter service.
///
/// ARCHITECTURAL RULE: No other module may call the chat-completion API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gpt-4-1106-preview (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for every letter.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4-1106-preview";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("OpenAI API key is not configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenAI API Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse response from OpenAI API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response format from OpenAI API")]
    EmptyResponse,
}

/// The generation seam. The pipeline only ever sees this trait, so tests and
/// alternate backends can stand in for the OpenAI client.
///
/// Carried in `AppState` as `Arc<dyn LetterGenerator>`.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Token counts are optional diagnostics; a malformed `usage` block never fails a letter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Chat-completion client. One request per call, no retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, GenerationError> {
        Self::with_endpoint(config, OPENAI_CHAT_COMPLETIONS_URL)
    }

    /// Same as [`LlmClient::new`] but pointed at another URL (mock servers in tests).
    pub fn with_endpoint(config: &Config, endpoint: &str) -> Result<Self, GenerationError> {
        Ok(Self {
            client: Client::builder()
                .timeout(config.generation_timeout)
                .build()?,
            api_key: config.openai_api_key.clone(),
            endpoint: endpoint.to_string(),
        })
    }

    /// Makes a raw call to the chat-completion API, returning the first choice's content.
    pub async fn call(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let request_body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            warn!("OpenAI API returned {}", status);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        decode_chat_response(&body)
    }
}

#[async_trait]
impl LetterGenerator for LlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        self.call(system, prompt).await
    }
}

/// Two-stage decode: a body that is not JSON at all is a `Decode` error,
/// valid JSON without a string at `choices[0].message.content` is an `EmptyResponse`.
/// Nothing else in the body is required.
fn decode_chat_response(body: &str) -> Result<String, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    if let Some(usage) = value
        .get("usage")
        .and_then(|u| serde_json::from_value::<Usage>(u.clone()).ok())
    {
        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    value
        .pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(GenerationError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn test_config(api_key: Option<&str>) -> Config {
        Config {
            openai_api_key: api_key.map(str::to_string),
            generation_timeout: Duration::from_secs(5),
            ..Config::default()
        }
    }

    async fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::with_endpoint(
            &test_config(Some("sk-test")),
            &format!("{}/v1/chat/completions", server.uri()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_extracts_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(decode_chat_response(body).unwrap(), "first");
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let result = decode_chat_response("not json");
        assert!(matches!(result, Err(GenerationError::Decode(_))));
    }

    #[test]
    fn test_decode_missing_content_is_empty_response() {
        for body in [
            r#"{"choices":[{}]}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"id":"x"}"#,
            "[1, 2]",
        ] {
            let result = decode_chat_response(body);
            assert!(
                matches!(result, Err(GenerationError::EmptyResponse)),
                "body {body} should be an EmptyResponse"
            );
        }
    }

    #[test]
    fn test_decode_ignores_malformed_usage() {
        let body = r#"{"choices":[{"message":{"content":"Dear VA,..."}}],"usage":{"prompt_tokens":null,"completion_tokens":3}}"#;
        assert_eq!(decode_chat_response(body).unwrap(), "Dear VA,...");
    }

    #[test]
    fn test_decode_ignores_malformed_later_choices() {
        let body = r#"{"choices":[{"message":{"content":"Dear VA,..."}},{}]}"#;
        assert_eq!(decode_chat_response(body).unwrap(), "Dear VA,...");
    }

    #[tokio::test]
    async fn test_generate_sends_two_messages_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"choices":[{"message":{"role":"assistant","content":"Dear VA,..."}}],"usage":{"prompt_tokens":10,"completion_tokens":3}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let text = client.generate("system text", "user text").await.unwrap();
        assert_eq!(text, "Dear VA,...");

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], MODEL);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "system text");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "user text");
    }

    #[tokio::test]
    async fn test_generate_non_200_is_api_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("s", "u").await.unwrap_err();
        match &err {
            GenerationError::Api { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_generate_does_not_retry_rate_limits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::Api { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::Decode(_)));
    }

    #[tokio::test]
    async fn test_generate_missing_content_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"choices":[{}]}"#))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"choices":[{"message":{"content":"late"}}]}"#)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = Config {
            openai_api_key: Some("sk-test".to_string()),
            generation_timeout: Duration::from_millis(200),
            ..Config::default()
        };
        let client =
            LlmClient::with_endpoint(&config, &format!("{}/v1/chat/completions", server.uri()))
                .unwrap();
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_generate_unreachable_host_is_transport_error() {
        let client =
            LlmClient::with_endpoint(&test_config(Some("sk-test")), "http://127.0.0.1:1/v1")
                .unwrap();
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[tokio::test]
    async fn test_generate_without_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = LlmClient::with_endpoint(&test_config(None), &server.uri()).unwrap();
        let err = client.generate("s", "u").await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured));
    }
}
