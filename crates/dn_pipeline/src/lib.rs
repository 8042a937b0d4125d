use std::sync::Arc;

use dn_search::SerperClient;
use reqwest::Client;

pub mod manager;

pub use manager::{
    apply_code_outcomes, CodeOutcome, NewsPipeline, NO_RESULTS_MESSAGE, RESULTS_PER_TOPIC,
};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub serper_api_key: String,
    pub serper_endpoint: Option<String>,
    pub inference: dn_inference::Config,
}

/// Build the production pipeline. Every adapter shares `client`'s connection pool.
pub fn create_pipeline(config: &PipelineConfig, client: Client) -> NewsPipeline {
    let mut search = SerperClient::new(client.clone(), config.serper_api_key.clone());
    if let Some(endpoint) = &config.serper_endpoint {
        search = search.with_endpoint(endpoint.clone());
    }
    let generators = dn_inference::create_generators(&config.inference, client);

    NewsPipeline::new(Arc::new(search), generators.content, generators.code)
}

pub mod prelude {
    pub use super::{create_pipeline, NewsPipeline, PipelineConfig};
    pub use dn_core::{Article, Error, PipelineResult, Result};
}
