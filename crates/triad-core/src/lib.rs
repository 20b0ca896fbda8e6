pub mod config;
pub mod driver;
pub mod llm;
pub mod pipeline;
pub mod research;
pub mod retry;
pub mod search;
pub mod storage;

pub use config::{Config, ConfigError};
pub use driver::{Command, Driver, DriverState, SessionStats};
pub use llm::{GeminiClient, LLMError, OpenAIClient, LLM};
pub use pipeline::{CollaboratorFactory, Collaborators, PipelineError};
pub use research::{
    AnalysisOutcome, AnalysisResult, Analyst, SearchOutcome, SearchResult, Searcher, Source,
    StructureOutcome, Structurer,
};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use search::{SearchError, SearchProvider, TavilyClient};
pub use storage::{FileStorage, ReportStore, StorageError};
