use std::fmt;

use async_trait::async_trait;
use dn_core::{SearchProvider, SearchResult};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Domains the search engine is asked to restrict results to.
pub const ALLOWED_SITES: &[&str] = &[
    "github.com",
    "dev.to",
    "medium.com",
    "techcrunch.com",
    "stackoverflow.com",
    "hackernews.com",
];

#[derive(Serialize)]
struct SerperRequest {
    q: String,
    num: usize,
}

#[derive(Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

impl From<OrganicResult> for SearchResult {
    fn from(item: OrganicResult) -> Self {
        Self {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
        }
    }
}

#[derive(Clone)]
pub struct SerperClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl fmt::Debug for SerperClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerperClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl SerperClient {
    const BASE_URL: &'static str = "https://google.serper.dev/search";

    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            endpoint: Self::BASE_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, String> {
        let request = SerperRequest {
            q: site_scoped_query(query),
            num: count * 2,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(format!("status {}", status.as_u16()));
        }

        let body = response
            .json::<SerperResponse>()
            .await
            .map_err(|e| e.to_string())?;
        debug!("Serper returned {} organic results", body.organic.len());

        Ok(body
            .organic
            .into_iter()
            .take(count)
            .map(SearchResult::from)
            .collect())
    }
}

/// Append the site filter disjunction to a free-text query.
pub fn site_scoped_query(query: &str) -> String {
    let filters = ALLOWED_SITES
        .iter()
        .map(|site| format!("site:{}", site))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("{} {}", query, filters)
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str, count: usize) -> Vec<SearchResult> {
        info!("🔍 Searching for \"{}\"", query);
        match self.fetch(query, count).await {
            Ok(results) => {
                if results.is_empty() {
                    warn!("Serper returned no results for \"{}\"", query);
                }
                results
            }
            Err(e) => {
                error!("Serper API error: {}", e);
                Vec::new()
            }
        }
    }
}
