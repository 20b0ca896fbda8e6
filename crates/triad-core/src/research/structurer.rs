use tracing::{info, warn};

use crate::config::Config;
use crate::llm::{LLMError, OpenAIClient, LLM};
use crate::research::document::StructureOutcome;
use crate::research::prompts::{build_structure_prompt, STRUCTURER_SYSTEM_PROMPT};

/// Formats the analysis into a Markdown report.
pub struct Structurer {
    llm: Box<dyn LLM>,
}

impl Structurer {
    pub fn new(llm: impl LLM + 'static) -> Self {
        Self { llm: Box::new(llm) }
    }

    /// Creates a Groq-backed structurer.
    ///
    /// Fails when no Groq API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, LLMError> {
        let client = OpenAIClient::from_config(&config.structurer)?
            .with_http_client(config.http.build_client()?);
        Ok(Self::new(client))
    }

    /// Formats the analyst's JSON. Single attempt, no retry.
    pub async fn structure(&self, analysis_data: &str) -> StructureOutcome {
        let prompt = build_structure_prompt(analysis_data);

        match self
            .llm
            .complete_with_system(STRUCTURER_SYSTEM_PROMPT, &prompt)
            .await
        {
            Ok(markdown) => {
                info!(bytes = markdown.len(), "Report formatted");
                StructureOutcome::Markdown(markdown)
            }
            Err(e) => {
                warn!(error = %e, "Structuring failed");
                StructureOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
