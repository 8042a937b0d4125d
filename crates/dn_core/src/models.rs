use std::fmt;

use async_trait::async_trait;

use crate::category::Category;
use crate::error::ProviderError;
use crate::types::{GeneratedContent, SearchResult};
use crate::Result;

/// A single system + user exchange sent to a chat-completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync + fmt::Debug {
    /// Human readable provider name, used in logs and error strings
    fn name(&self) -> &str;

    /// Run one chat completion and return the assistant message text
    async fn complete(&self, prompt: &ChatPrompt) -> std::result::Result<String, ProviderError>;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return at most `count` hits for `query`. Failures degrade to an empty list.
    async fn search(&self, query: &str, count: usize) -> Vec<SearchResult>;
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Expand a search hit into article text. Never fails.
    async fn generate(&self, title: &str, snippet: &str, category: Category) -> GeneratedContent;
}

#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Produce a code sample illustrating `article_content`
    async fn generate_code(&self, article_content: &str) -> Result<String>;
}
