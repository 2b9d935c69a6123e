//! Generation client abstraction.
//!
//! One request, one response, no retry. The real client speaks the
//! OpenAI-compatible chat-completions protocol; the fake client replays
//! canned responses and counts calls for tests.

use crate::config::LlmConfig;
use crate::credentials::ApiKey;
use crate::error::SorcererError;
use crate::prompts::CompiledPrompt;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};

/// Sends a compiled prompt and returns the raw assistant text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        api_key: &ApiKey,
        prompt: &CompiledPrompt,
    ) -> std::result::Result<String, SorcererError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client over HTTP
pub struct HttpLlmClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl HttpLlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(
        &self,
        api_key: &ApiKey,
        prompt: &CompiledPrompt,
    ) -> std::result::Result<String, SorcererError> {
        let url = self.completions_url();
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(
            "POST {} model={} prompt_len={}",
            url,
            self.config.model,
            prompt.user.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| SorcererError::ServiceUnavailable {
                status: None,
                detail: format!("Request failed: {}", e),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SorcererError::ServiceUnavailable {
                status: Some(status.as_u16()),
                detail: format!("Failed to read response body: {}", e),
            })?;

        if !status.is_success() {
            warn!("Generation service returned HTTP {}", status);
            return Err(SorcererError::ServiceUnavailable {
                status: Some(status.as_u16()),
                detail: text,
            });
        }

        let envelope: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            SorcererError::malformed(format!("Unreadable chat response envelope: {}", e), &text)
        })?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SorcererError::malformed("Chat response has no message content", &text))?;

        debug!("Generation response length: {}", content.len());
        Ok(content)
    }
}

/// Fake client for testing
pub struct FakeLlmClient {
    responses: Mutex<Vec<std::result::Result<String, SorcererError>>>,
    call_count: Mutex<usize>,
    last_prompt: Mutex<Option<CompiledPrompt>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl FakeLlmClient {
    /// Responses are handed out in order; the last one repeats.
    pub fn new(responses: Vec<std::result::Result<String, SorcererError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn always_text(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn always_error(error: SorcererError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    pub fn last_prompt(&self) -> Option<CompiledPrompt> {
        lock(&self.last_prompt).clone()
    }
}

#[async_trait]
impl LlmClient for FakeLlmClient {
    async fn complete(
        &self,
        _api_key: &ApiKey,
        prompt: &CompiledPrompt,
    ) -> std::result::Result<String, SorcererError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_prompt) = Some(prompt.clone());

        let mut responses = lock(&self.responses);
        match responses.len() {
            0 => Err(SorcererError::ServiceUnavailable {
                status: None,
                detail: "fake client has no responses left".to_string(),
            }),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{CampaignBrief, GenerationMode};
    use crate::prompts::compile_prompt;

    fn prompt() -> CompiledPrompt {
        compile_prompt(&CampaignBrief::default(), GenerationMode::standard())
    }

    fn key() -> ApiKey {
        ApiKey::new("sk-test").unwrap()
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let client = HttpLlmClient::new(LlmConfig {
            endpoint: "http://localhost:9999/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let p = prompt();
        let body = ChatRequest {
            model: "gpt-4o",
            messages: [
                ChatMessage { role: "system", content: &p.system },
                ChatMessage { role: "user", content: &p.user },
            ],
            max_tokens: 1100,
            temperature: 0.8,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["max_tokens"], 1100);
    }

    #[tokio::test]
    async fn test_fake_client_repeats_last_response() {
        let client = FakeLlmClient::always_text("hello");
        assert_eq!(client.complete(&key(), &prompt()).await.unwrap(), "hello");
        assert_eq!(client.complete(&key(), &prompt()).await.unwrap(), "hello");
        assert_eq!(client.call_count(), 2);
        assert!(client.last_prompt().is_some());
    }

    #[tokio::test]
    async fn test_fake_client_sequence() {
        let client = FakeLlmClient::new(vec![
            Ok("one".into()),
            Err(SorcererError::ServiceUnavailable {
                status: Some(500),
                detail: "boom".into(),
            }),
        ]);
        assert_eq!(client.complete(&key(), &prompt()).await.unwrap(), "one");
        let err = client.complete(&key(), &prompt()).await.unwrap_err();
        assert_eq!(err.kind(), "service_unavailable");
        assert_eq!(client.call_count(), 2);
    }
}
