use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dn_core::{ChatModel, ChatPrompt, CodeGenerator, ProviderError, Result};
use tracing::{info, warn};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a senior developer creating practical code examples for tech news articles. \
Generate working code snippets that demonstrate the concepts discussed in the article. \
Focus on practical, production-ready examples that developers can use.";

const FALLBACK_TEMPERATURE: f32 = 0.3;

/// Read the code-generation system prompt, or the built-in one if the file is absent.
pub fn load_system_prompt(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(prompt) => {
            info!("📜 Loaded system prompt from {}", path.display());
            Ok(prompt)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("📜 No system prompt at {}, using built-in default", path.display());
            Ok(DEFAULT_SYSTEM_PROMPT.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

/// One entry in the fallback rule list: when `matches` holds for the primary
/// provider's error, the fallback provider is called.
#[derive(Clone, Copy)]
pub struct FallbackRule {
    pub reason: &'static str,
    pub matches: fn(&ProviderError) -> bool,
}

impl fmt::Debug for FallbackRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackRule").field("reason", &self.reason).finish()
    }
}

impl FallbackRule {
    pub fn new(reason: &'static str, matches: fn(&ProviderError) -> bool) -> Self {
        Self { reason, matches }
    }
}

pub fn default_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule::new("payment required", |e| e.status() == Some(402)),
        FallbackRule::new("rate limited", |e| e.status() == Some(429)),
        FallbackRule::new("unauthorized", |e| e.status() == Some(401)),
        FallbackRule::new("error status", |e| e.status().is_some()),
        FallbackRule::new("connection error", |e| {
            matches!(e, ProviderError::Transport { .. } | ProviderError::Malformed { .. })
        }),
    ]
}

/// Generates code with a primary provider and hands off to a fallback
/// provider when the primary's failure matches one of the rules.
#[derive(Debug)]
pub struct ProviderChainCodeGenerator {
    primary: Arc<dyn ChatModel>,
    fallback: Arc<dyn ChatModel>,
    system_prompt: String,
    rules: Vec<FallbackRule>,
}

impl ProviderChainCodeGenerator {
    pub fn new(
        primary: Arc<dyn ChatModel>,
        fallback: Arc<dyn ChatModel>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            system_prompt: system_prompt.into(),
            rules: default_rules(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<FallbackRule>) -> Self {
        self.rules = rules;
        self
    }

    async fn run_fallback(&self, article_content: &str) -> String {
        let prompt = ChatPrompt::new(self.system_prompt.as_str(), article_content)
            .with_temperature(FALLBACK_TEMPERATURE);
        match self.fallback.complete(&prompt).await {
            Ok(code) => code,
            Err(e) => format!("⚠️ {} API Error: {}", self.fallback.name(), e),
        }
    }
}

#[async_trait]
impl CodeGenerator for ProviderChainCodeGenerator {
    async fn generate_code(&self, article_content: &str) -> Result<String> {
        let prompt = ChatPrompt::new(self.system_prompt.as_str(), article_content);
        let err = match self.primary.complete(&prompt).await {
            Ok(code) => return Ok(code),
            Err(e) => e,
        };

        let rule = self
            .rules
            .iter()
            .find(|rule| (rule.matches)(&err))
            .ok_or_else(|| err.clone())?;

        warn!(
            "{} API {} ({}), falling back to {}...",
            self.primary.name(),
            rule.reason,
            err,
            self.fallback.name()
        );
        Ok(self.run_fallback(article_content).await)
    }
}
