use tracing::{info, warn};

use crate::config::{Config, DEFAULT_SEARCH_DEPTH, MAX_SOURCES};
use crate::research::document::{SearchOutcome, SearchResult};
use crate::search::{SearchError, SearchProvider, SearchRequest, TavilyClient};

/// Retrieves web sources for a query.
pub struct Searcher {
    provider: Box<dyn SearchProvider>,
}

impl Searcher {
    /// Creates a searcher over any search provider.
    pub fn new(provider: impl SearchProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Creates a Tavily-backed searcher.
    ///
    /// Fails when no Tavily API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, SearchError> {
        let client = TavilyClient::from_config(&config.search)?
            .with_http_client(config.http.build_client()?);
        Ok(Self::new(client))
    }

    /// The request sent for a query: basic depth, three results, direct answer.
    pub fn request_for(query: &str) -> SearchRequest {
        SearchRequest {
            query: query.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH.to_string(),
            max_results: MAX_SOURCES,
            include_answer: true,
        }
    }

    /// Runs the search. Provider errors become `SearchOutcome::Failed`.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        info!(query, "Running web search");

        match self.provider.search(&Self::request_for(query)).await {
            Ok(response) => {
                let result = SearchResult::from_response(query, response);
                info!(sources = result.sources.len(), "Search complete");
                SearchOutcome::Found(result)
            }
            Err(e) => {
                warn!(error = %e, "Search failed");
                SearchOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
