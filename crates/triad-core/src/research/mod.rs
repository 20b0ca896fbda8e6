mod analyst;
mod document;
pub mod prompts;
mod searcher;
mod structurer;

pub use analyst::{strip_code_fences, Analyst};
pub use document::{
    AnalysisOutcome, AnalysisResult, SearchOutcome, SearchResult, Source, StructureOutcome,
};
pub use searcher::Searcher;
pub use structurer::Structurer;
