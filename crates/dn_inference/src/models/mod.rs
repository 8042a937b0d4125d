use std::fmt;

use async_trait::async_trait;
use dn_core::{ChatModel, ChatPrompt, ProviderError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ProviderConfig;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Both Groq and Blackbox speak this dialect; only the endpoint, model and
/// key differ, so one adapter serves both.
pub struct ChatCompletionsModel {
    client: Client,
    config: ProviderConfig,
}

impl ChatCompletionsModel {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    fn transport(&self, e: impl fmt::Display) -> ProviderError {
        ProviderError::Transport {
            provider: self.config.name.clone(),
            message: e.to_string(),
        }
    }

    fn malformed(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::Malformed {
            provider: self.config.name.clone(),
            message: message.into(),
        }
    }
}

impl fmt::Debug for ChatCompletionsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsModel")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl ChatModel for ChatCompletionsModel {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: prompt.temperature,
        };

        debug!(
            "Sending {} chars to {} ({})",
            prompt.user.len(),
            self.config.name,
            self.config.model
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                provider: self.config.name.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| self.malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| self.malformed("response contained no choices"))
    }
}
