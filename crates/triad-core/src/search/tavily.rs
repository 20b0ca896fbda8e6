use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{SearchError, SearchProvider, SearchRequest, SearchResponse};
use crate::config::{SearchConfig, DEFAULT_SEARCH_URL, SEARCH_API_KEY_ENV};

/// Tavily search API client.
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl TavilyClient {
    /// Creates a new Tavily client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_SEARCH_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Creates a client from the search configuration.
    ///
    /// Fails with `MissingApiKey` when neither the config nor `TAVILY_API_KEY`
    /// provide a key.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = config
            .api_key_or_env()
            .ok_or(SearchError::MissingApiKey(SEARCH_API_KEY_ENV))?;

        Ok(Self::new(api_key).with_base_url(&config.base_url))
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the underlying HTTP client (e.g. one with timeouts).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search", self.base_url);

        debug!(
            url = url.as_str(),
            depth = request.search_depth.as_str(),
            max_results = request.max_results,
            "Sending Tavily search request"
        );

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))
    }
}
