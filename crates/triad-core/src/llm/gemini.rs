//! Google Gemini API client.
//!
//! Differences from the OpenAI-compatible client:
//! - Auth via the `x-goog-api-key` header
//! - System instruction is a top-level `system_instruction` field
//! - The response text lives in `candidates[0].content.parts[*].text`

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LLMError, LLM};
use crate::config::{
    AnalystConfig, ANALYST_API_KEY_ENV, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL,
};

/// Gemini `generateContent` client.
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            client: Client::new(),
        }
    }

    /// Creates a client from the analyst configuration.
    ///
    /// Fails with `MissingApiKey` when neither the config nor `GEMINI_API_KEY`
    /// provide a key.
    pub fn from_config(config: &AnalystConfig) -> Result<Self, LLMError> {
        let api_key = config
            .api_key_or_env()
            .ok_or(LLMError::MissingApiKey(ANALYST_API_KEY_ENV))?;

        Ok(Self::new(api_key)
            .with_model(&config.model)
            .with_base_url(&config.base_url))
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replaces the underlying HTTP client (e.g. one with timeouts).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<String, LLMError> {
        debug!(
            model = self.model.as_str(),
            url = self.endpoint().as_str(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        extract_text(body)
    }
}

#[async_trait]
impl LLM for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let request = GenerateRequest::user(prompt, None);
        self.send_request(&request).await
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String, LLMError> {
        let request = GenerateRequest::user(prompt, Some(system));
        self.send_request(&request).await
    }
}

/// Joins the text parts of the first candidate.
fn extract_text(body: GenerateResponse) -> Result<String, LLMError> {
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::ParseError("Empty 'candidates' array in response".to_string()))?;

    let text = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(LLMError::ParseError(format!(
            "Candidate contained no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

impl GenerateRequest {
    fn user(prompt: &str, system: Option<&str>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(prompt)],
            }],
            system_instruction: system.map(|s| Content {
                role: None,
                parts: vec![Part::text(s)],
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new("key").with_base_url("https://proxy.example.com/v1beta/");
        assert_eq!(
            client.endpoint(),
            "https://proxy.example.com/v1beta/models/gemini-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(GenerateRequest::user("analyze", Some("be precise"))).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "analyze");
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "be precise");

        let json = serde_json::to_value(GenerateRequest::user("analyze", None)).unwrap();
        assert!(json.get("system_instruction").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_errors() {
        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(extract_text(empty), Err(LLMError::ParseError(_))));

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        let err = extract_text(blocked).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
