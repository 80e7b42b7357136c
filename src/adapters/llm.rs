use crate::core::{GenerationParams, TextGenerator};
use crate::utils::error::{Result, StoryError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// OpenAI 相容的 chat/completions 客戶端 (Groq / OpenAI)
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionClient {
    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = ChatRequest {
            model: &params.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let endpoint = self.endpoint();
        tracing::debug!("Making completion request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Completion response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("❌ Completion API error ({}): {}", status, body);
            return Err(StoryError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(StoryError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn params() -> GenerationParams {
        GenerationParams {
            model: "llama3-8b-8192".to_string(),
            max_tokens: 320,
            temperature: 0.85,
        }
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_and_params() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("Authorization", "Bearer test-key")
                .body_contains("\"model\":\"llama3-8b-8192\"")
                .body_contains("\"max_tokens\":320")
                .body_contains("\"temperature\":0.85")
                .body_contains("Write about Cyrus");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "A scroll for Cyrus."}}]
                }));
        });

        let client = ChatCompletionClient::new(server.base_url(), "test-key");
        let text = client.complete("Write about Cyrus", &params()).await.unwrap();

        api_mock.assert();
        assert_eq!(text, "A scroll for Cyrus.");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"content": "ok"}}]
            }));
        });

        let client = ChatCompletionClient::new(format!("{}/", server.url("/v1")), "k");
        assert_eq!(client.complete("p", &params()).await.unwrap(), "ok");
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_error_status_becomes_upstream_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429).body("rate limit exceeded");
        });

        let client = ChatCompletionClient::new(server.base_url(), "test-key");
        let err = client.complete("prompt", &params()).await.unwrap_err();

        api_mock.assert();
        match err {
            StoryError::UpstreamError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limit exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).body("<html>not json</html>");
        });

        let client = ChatCompletionClient::new(server.base_url(), "test-key");
        let err = client.complete("prompt", &params()).await.unwrap_err();
        assert!(matches!(err, StoryError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_missing_choices_is_empty_completion() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });

        let client = ChatCompletionClient::new(server.base_url(), "test-key");
        let err = client.complete("prompt", &params()).await.unwrap_err();
        assert!(matches!(err, StoryError::EmptyCompletion));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_api_error() {
        // 9 號埠 (discard) 通常沒有服務
        let client = ChatCompletionClient::with_timeout(
            "http://127.0.0.1:9",
            "test-key",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.complete("prompt", &params()).await.unwrap_err();
        assert!(matches!(err, StoryError::ApiError(_)));
    }
}
