use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;

/// Placeholder stored in `Article::code` until the code generator has answered.
pub const CODE_PLACEHOLDER: &str = "// Code example will be generated...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// The three fields a content model is asked to produce.
///
/// Deserialization is strict: the object must carry exactly these keys and
/// every value must be a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratedContent {
    pub full_content: String,
    pub summary: String,
    pub dev_insight: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub category: Category,
    pub source_url: String,
    pub full_content: String,
    pub summary: String,
    pub dev_insight: String,
}

impl ArticleDraft {
    pub fn new(result: SearchResult, category: Category, content: GeneratedContent) -> Self {
        Self {
            title: result.title,
            category,
            source_url: result.link,
            full_content: content.full_content,
            summary: content.summary,
            dev_insight: content.dev_insight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub insight: String,
    pub category: String,
    pub source_url: String,
    pub full_content: String,
    pub code: String,
}

impl From<ArticleDraft> for Article {
    fn from(draft: ArticleDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            summary: draft.summary,
            insight: draft.dev_insight,
            category: draft.category.display_name().to_string(),
            source_url: draft.source_url,
            full_content: draft.full_content,
            code: CODE_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Article>,
    pub message: String,
}

impl PipelineResult {
    pub fn success(data: Vec<Article>) -> Self {
        let message = format!("Generated {} news summaries", data.len());
        Self {
            success: true,
            data,
            message,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            message: message.into(),
        }
    }
}
