use std::sync::Arc;

use async_trait::async_trait;
use dn_core::{Category, ChatModel, ChatPrompt, ContentGenerator, GeneratedContent, ProviderError};
use tracing::{debug, warn};

const SYSTEM_PROMPT: &str = "You are a senior tech journalist who creates detailed technical content from article titles and snippets. Always respond with valid JSON.";

const TEMPERATURE: f32 = 0.7;

pub const FALLBACK_INSIGHT: &str = "This is relevant for developers working with modern technology stacks.";

/// Expands search hits into full articles through a chat model.
#[derive(Debug)]
pub struct LlmContentGenerator {
    model: Arc<dyn ChatModel>,
}

impl LlmContentGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    async fn try_generate(
        &self,
        title: &str,
        snippet: &str,
        category: Category,
    ) -> Result<GeneratedContent, ProviderError> {
        let prompt = ChatPrompt::new(SYSTEM_PROMPT, content_prompt(title, snippet, category))
            .with_temperature(TEMPERATURE);
        let text = self.model.complete(&prompt).await?;
        parse_content(self.model.name(), &text)
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(&self, title: &str, snippet: &str, category: Category) -> GeneratedContent {
        match self.try_generate(title, snippet, category).await {
            Ok(content) => {
                debug!(
                    "Generated {} chars of content for \"{}\"",
                    content.full_content.len(),
                    title
                );
                content
            }
            Err(e) => {
                warn!("Content generation for \"{}\" failed, using fallback: {}", title, e);
                fallback_content(title, snippet)
            }
        }
    }
}

pub fn content_prompt(title: &str, snippet: &str, category: Category) -> String {
    format!(
        r#"You are a professional technical writer. Based only on the following article title and snippet, do NOT mix or duplicate content.

Title: {title}
Snippet: {snippet}
Category: {category}

Generate exactly:
1. "full_content": A well-structured, detailed article (500-800 words). DO NOT include summary phrases or repetition from the snippet here.
2. "summary": A concise 2-3 sentence summary, DISTINCT from the full content.
3. "dev_insight": A one-sentence insight about why the topic matters to developers.

Return strictly valid JSON with the following keys:
{{
    "full_content": "Only full article content here. No intro, no summary phrases.",
    "summary": "Distinct 2-3 sentence abstract.",
    "dev_insight": "One practical insight for developers."
}}"#,
        title = title,
        snippet = snippet,
        category = category.key(),
    )
}

/// Validate model output against the three-string-field schema.
pub fn parse_content(provider: &str, text: &str) -> Result<GeneratedContent, ProviderError> {
    serde_json::from_str(text.trim()).map_err(|e| ProviderError::Malformed {
        provider: provider.to_string(),
        message: e.to_string(),
    })
}

pub fn fallback_content(title: &str, snippet: &str) -> GeneratedContent {
    GeneratedContent {
        full_content: format!("Technical article about {}. {}", title, snippet),
        summary: snippet.to_string(),
        dev_insight: FALLBACK_INSIGHT.to_string(),
    }
}
