use thiserror::Error;

/// Errors that can occur while talking to the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing API key. Set the {0} environment variable.")]
    MissingApiKey(&'static str),

    #[error("Search API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network(err.without_url().to_string())
    }
}
