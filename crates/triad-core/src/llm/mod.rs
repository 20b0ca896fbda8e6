mod error;
mod gemini;
mod openai;

pub use error::LLMError;
pub use gemini::GeminiClient;
pub use openai::{ModelInfo, OpenAIClient};

use async_trait::async_trait;

/// Trait for Large Language Model providers.
///
/// The analyst and the structurer only depend on this trait, so the
/// pipeline can run against any provider (or a fake one in tests).
///
/// # Example
///
/// ```ignore
/// use triad_core::llm::{GeminiClient, LLM};
///
/// let llm = GeminiClient::new("my-key").with_model("gemini-flash-latest");
/// let response = llm.complete("Hello!").await?;
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Complete a prompt and return the response.
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;

    /// Complete a prompt with a system message.
    async fn complete_with_system(&self, system: &str, prompt: &str)
        -> Result<String, LLMError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        (**self).complete(prompt).await
    }

    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, LLMError> {
        (**self).complete_with_system(system, prompt).await
    }
}
