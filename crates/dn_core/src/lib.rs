pub mod category;
pub mod error;
pub mod models;
pub mod types;

pub use category::{categorize, Category};
pub use error::{Error, ProviderError};
pub use models::{ChatModel, ChatPrompt, CodeGenerator, ContentGenerator, SearchProvider};
pub use types::{
    Article, ArticleDraft, GeneratedContent, PipelineResult, SearchResult, CODE_PLACEHOLDER,
};

pub type Result<T> = std::result::Result<T, Error>;
