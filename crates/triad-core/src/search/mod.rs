mod error;
mod tavily;

pub use error::SearchError;
pub use tavily::TavilyClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A web search request as sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub max_results: usize,
    pub include_answer: bool,
}

/// Raw response from the search provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Short direct answer generated by the provider.
    #[serde(default)]
    pub answer: Option<String>,
    /// Ranked result pages.
    #[serde(default)]
    pub results: Vec<SearchHit>,
}

/// A single result page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Trait for web search providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs a search and returns the provider's response.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;
}
