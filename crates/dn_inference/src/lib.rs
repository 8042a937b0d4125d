use std::fmt;
use std::sync::Arc;

use dn_core::{ChatModel, CodeGenerator, ContentGenerator};
use reqwest::Client;

pub mod code;
pub mod content;
pub mod models;

pub use code::{
    default_rules, load_system_prompt, FallbackRule, ProviderChainCodeGenerator,
    DEFAULT_SYSTEM_PROMPT,
};
pub use content::{fallback_content, LlmContentGenerator, FALLBACK_INSIGHT};
pub use models::ChatCompletionsModel;

/// Where and how to reach one chat-completion provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ProviderConfig {
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            name: "Groq".to_string(),
            endpoint: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn blackbox(api_key: impl Into<String>) -> Self {
        Self {
            name: "Blackbox".to_string(),
            endpoint: "https://api.blackbox.ai/chat/completions".to_string(),
            model: "blackboxai/meta-llama/llama-3.1-405b-instruct".to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Writes article content; also the code fallback
    pub primary: ProviderConfig,
    /// First choice for code samples
    pub secondary: ProviderConfig,
    pub system_prompt: String,
}

impl Config {
    pub fn new(groq_api_key: impl Into<String>, blackbox_api_key: impl Into<String>) -> Self {
        Self {
            primary: ProviderConfig::groq(groq_api_key),
            secondary: ProviderConfig::blackbox(blackbox_api_key),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// The two generators the pipeline needs, wired onto one shared HTTP client.
pub struct Generators {
    pub content: Arc<dyn ContentGenerator>,
    pub code: Arc<dyn CodeGenerator>,
}

pub fn create_generators(config: &Config, client: Client) -> Generators {
    let primary: Arc<dyn ChatModel> = Arc::new(ChatCompletionsModel::new(
        client.clone(),
        config.primary.clone(),
    ));
    let secondary: Arc<dyn ChatModel> =
        Arc::new(ChatCompletionsModel::new(client, config.secondary.clone()));

    Generators {
        content: Arc::new(LlmContentGenerator::new(primary.clone())),
        code: Arc::new(ProviderChainCodeGenerator::new(
            secondary,
            primary,
            config.system_prompt.clone(),
        )),
    }
}

pub mod prelude {
    pub use super::{create_generators, Config, Generators, ProviderConfig};
    pub use dn_core::{CodeGenerator, ContentGenerator, Error, GeneratedContent, Result};
}
