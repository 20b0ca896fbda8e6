use tracing::{info, warn};

use crate::config::Config;
use crate::llm::{GeminiClient, LLMError, LLM};
use crate::research::document::AnalysisOutcome;
use crate::research::prompts::build_analysis_prompt;
use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};

/// Synthesizes search results into the four-field analysis.
pub struct Analyst {
    llm: Box<dyn LLM>,
    retry: RetryPolicy,
    sleeper: Box<dyn Sleeper>,
}

impl Analyst {
    /// Creates an analyst with the default retry policy.
    pub fn new(llm: impl LLM + 'static) -> Self {
        Self {
            llm: Box::new(llm),
            retry: RetryPolicy::default(),
            sleeper: Box::new(TokioSleeper),
        }
    }

    /// Creates a Gemini-backed analyst.
    ///
    /// Fails when no Gemini API key is configured.
    pub fn from_config(config: &Config) -> Result<Self, LLMError> {
        let client = GeminiClient::from_config(&config.analyst)?
            .with_http_client(config.http.build_client()?);
        Ok(Self::new(client).with_retry(RetryPolicy::from_config(&config.retry)))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// Analyzes the search stage's JSON.
    ///
    /// Rate-limit errors back off linearly and retry until the policy's
    /// attempts run out; any other error fails at once.
    pub async fn analyze(&self, search_data: &str) -> AnalysisOutcome {
        let prompt = build_analysis_prompt(search_data);
        let max_attempts = self.retry.max_attempts();

        for attempt in 1..=max_attempts {
            match self.llm.complete(&prompt).await {
                Ok(text) => {
                    info!(attempt, "Analysis complete");
                    return AnalysisOutcome::Completed(strip_code_fences(&text).to_string());
                }
                Err(e) if e.is_rate_limit() => {
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_secs = delay.as_secs(),
                        "Rate limit hit, waiting before retry"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => {
                    warn!(error = %e, "Analysis failed");
                    return AnalysisOutcome::Failed {
                        message: e.to_string(),
                    };
                }
            }
        }

        AnalysisOutcome::Exhausted {
            attempts: max_attempts,
        }
    }
}

/// Strips a Markdown code fence wrapped around a model response.
///
/// Handles ```` ```json ````, bare ```` ``` ```` and text before the fence.
/// Responses that already start as JSON are returned trimmed.
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    let Some(start) = trimmed.find("```") else {
        return trimmed;
    };
    let rest = &trimmed[start + 3..];

    // Skip the language tag, if any
    let body = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[pos + 1..]
        }
        _ => rest.strip_prefix("json").unwrap_or(rest),
    };

    let body = match body.rfind("```") {
        Some(end) => &body[..end],
        None => body,
    };

    body.trim()
}
