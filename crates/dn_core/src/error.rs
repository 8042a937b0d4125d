use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

/// Failure of a single call to a language-model provider.
///
/// Everything a provider can do wrong collapses into one of these three kinds.
/// Callers decide on fallbacks by inspecting the kind, never the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned a malformed response: {message}")]
    Malformed { provider: String, message: String },
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            ProviderError::Status { provider, .. }
            | ProviderError::Transport { provider, .. }
            | ProviderError::Malformed { provider, .. } => provider,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
