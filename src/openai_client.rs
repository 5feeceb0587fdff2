// OpenAI chat-completions client used as the completion service
use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::completion::CompletionService;
use crate::config::Settings;
use crate::error::CompletionError;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<ChatResponse, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages,
        };

        tracing::debug!(
            "OpenAI API request: model={} messages={}",
            request.model,
            request.messages.len()
        );

        let backoff_config = ExponentialBackoff {
            initial_interval: Duration::from_secs(1),
            max_interval: Duration::from_secs(30),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(120)),
            ..Default::default()
        };

        // Retry transient failures (connection errors, 429/5xx); everything
        // else is permanent.
        let operation = || async {
            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .header("content-type", "application/json")
                .timeout(Duration::from_secs(60))
                .json(&request)
                .send()
                .await
                .map_err(|e| {
                    if e.is_connect() || e.is_timeout() {
                        tracing::warn!("OpenAI API connection error (retrying): {}", e);
                        backoff::Error::transient(CompletionError::Request(e))
                    } else {
                        tracing::error!("OpenAI API permanent error: {}", e);
                        backoff::Error::permanent(CompletionError::Request(e))
                    }
                })?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| backoff::Error::permanent(CompletionError::Request(e)))?;

            tracing::debug!("OpenAI API response (status {})", status);

            if matches!(status.as_u16(), 429 | 500 | 502 | 503) {
                tracing::warn!("OpenAI API returned {} (retrying)", status);
                return Err(backoff::Error::transient(CompletionError::Api {
                    status: status.as_u16(),
                    body,
                }));
            }

            if !status.is_success() {
                tracing::error!("OpenAI API error ({}): {}", status, body);
                return Err(backoff::Error::permanent(CompletionError::Api {
                    status: status.as_u16(),
                    body,
                }));
            }

            serde_json::from_str(&body)
                .map_err(|e| backoff::Error::permanent(CompletionError::Parse(e)))
        };

        retry(backoff_config, operation).await
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ];

        let response = self.chat(messages).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
