use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::MAX_SOURCES;
use crate::search::SearchResponse;

/// Normalized output of the search stage.
///
/// This is the JSON envelope handed to the analyst; field names are part
/// of the prompt contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The query exactly as the user typed it.
    pub query_used: String,
    /// The provider's short direct answer (empty if none).
    pub tavily_answer: String,
    /// At most three source excerpts, in provider rank order.
    pub sources: Vec<Source>,
}

impl SearchResult {
    /// Builds the envelope from a raw provider response.
    ///
    /// Missing fields become empty strings and the source list is capped.
    pub fn from_response(query: &str, response: SearchResponse) -> Self {
        let sources = response
            .results
            .into_iter()
            .take(MAX_SOURCES)
            .map(|hit| Source {
                title: hit.title.unwrap_or_default(),
                url: hit.url.unwrap_or_default(),
                content: hit.content.unwrap_or_default(),
            })
            .collect();

        Self {
            query_used: query.to_string(),
            tavily_answer: response.answer.unwrap_or_default(),
            sources,
        }
    }
}

/// A single source excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// Result of the search stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResult),
    Failed { message: String },
}

impl SearchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed { .. })
    }

    /// The search result, if the search succeeded.
    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            SearchOutcome::Failed { .. } => None,
        }
    }

    /// Renders the outcome as pretty-printed JSON.
    ///
    /// Always valid JSON: either the search envelope or
    /// `{"error": "Search failed: ..."}`.
    pub fn to_json(&self) -> String {
        match self {
            SearchOutcome::Found(result) => serde_json::to_string_pretty(result)
                .unwrap_or_else(|e| error_json(&format!("Search failed: {}", e))),
            SearchOutcome::Failed { message } => error_json(&format!("Search failed: {}", message)),
        }
    }
}

/// The four narrative fields the analyst is asked to return.
///
/// Not enforced on the pipeline path; the structurer receives whatever
/// text the provider produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub topic_type: String,
    pub core_answer: String,
    pub detailed_analysis: String,
    pub expert_context: String,
}

impl AnalysisResult {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Result of the analysis stage.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Provider text with code fences stripped.
    Completed(String),
    /// A non-retryable provider error.
    Failed { message: String },
    /// Every attempt was rate limited.
    Exhausted { attempts: u32 },
}

impl AnalysisOutcome {
    pub fn is_failed(&self) -> bool {
        !matches!(self, AnalysisOutcome::Completed(_))
    }

    /// Parses the completed text into its four fields.
    pub fn parsed(&self) -> Option<AnalysisResult> {
        match self {
            AnalysisOutcome::Completed(text) => AnalysisResult::from_json(text).ok(),
            _ => None,
        }
    }

    /// The string handed to the next stage.
    pub fn into_payload(self) -> String {
        match self {
            AnalysisOutcome::Completed(text) => text,
            AnalysisOutcome::Failed { message } => {
                error_json(&format!("Analysis failed: {}", message))
            }
            AnalysisOutcome::Exhausted { .. } => error_json("Failed after max retries."),
        }
    }
}

/// Result of the structuring stage.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureOutcome {
    Markdown(String),
    Failed { message: String },
}

impl StructureOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StructureOutcome::Failed { .. })
    }

    /// The report text, or `Error structuring report: ...` on failure.
    pub fn into_text(self) -> String {
        match self {
            StructureOutcome::Markdown(markdown) => markdown,
            StructureOutcome::Failed { message } => {
                format!("Error structuring report: {}", message)
            }
        }
    }
}

fn error_json(message: &str) -> String {
    json!({ "error": message }).to_string()
}
