use thiserror::Error;

use crate::config::Config;
use crate::llm::LLMError;
use crate::research::{Analyst, Searcher, Structurer};
use crate::search::SearchError;
use crate::storage::StorageError;

/// Errors that abort a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Search setup failed: {0}")]
    Search(#[from] SearchError),

    #[error("LLM setup failed: {0}")]
    LLM(#[from] LLMError),

    #[error("Failed to save report: {0}")]
    Storage(#[from] StorageError),

    #[error("Error structuring report: {0}")]
    Structuring(String),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The three collaborators of one pipeline run.
///
/// Built fresh for every query so no state leaks between runs.
pub struct Collaborators {
    pub searcher: Searcher,
    pub analyst: Analyst,
    pub structurer: Structurer,
}

impl Collaborators {
    pub fn new(searcher: Searcher, analyst: Analyst, structurer: Structurer) -> Self {
        Self {
            searcher,
            analyst,
            structurer,
        }
    }

    /// Builds the production collaborators.
    ///
    /// Fails if any provider's API key is missing.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self {
            searcher: Searcher::from_config(config)?,
            analyst: Analyst::from_config(config)?,
            structurer: Structurer::from_config(config)?,
        })
    }
}

/// Produces collaborators for each run.
pub trait CollaboratorFactory {
    fn build(&self) -> Result<Collaborators, PipelineError>;
}

impl<F> CollaboratorFactory for F
where
    F: Fn() -> Result<Collaborators, PipelineError>,
{
    fn build(&self) -> Result<Collaborators, PipelineError> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_search_key_is_reported_first() {
        let mut config = Config::default();
        config.search.api_key = None;
        config.analyst.api_key = Some("g".to_string());
        config.structurer.api_key = Some("q".to_string());

        // TAVILY_API_KEY may be set in the environment; only assert when it isn't.
        if std::env::var("TAVILY_API_KEY").is_err() {
            let err = Collaborators::from_config(&config).err().unwrap();
            assert!(matches!(err, PipelineError::Search(SearchError::MissingApiKey(_))));
            assert!(err.to_string().contains("TAVILY_API_KEY"));
        }
    }

    #[test]
    fn test_all_keys_present_builds() {
        let mut config = Config::default();
        config.search.api_key = Some("t".to_string());
        config.analyst.api_key = Some("g".to_string());
        config.structurer.api_key = Some("q".to_string());

        assert!(Collaborators::from_config(&config).is_ok());
    }
}
