use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Missing API key. Set the {0} environment variable.")]
    MissingApiKey(&'static str),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited (429). Try again later.")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),
}

impl LLMError {
    /// Returns true if the error signals an exceeded request quota.
    ///
    /// Typed variants are checked first; otherwise the upstream message of
    /// a failed request is inspected for the `429` status indicator, which
    /// also catches quota errors a proxy reports with a different status.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            LLMError::RateLimited => true,
            LLMError::ApiError { status: 429, .. } => true,
            LLMError::ApiError { message, .. } => message.contains("429"),
            LLMError::RequestFailed(message) => message.contains("429"),
            _ => false,
        }
    }
}

/// The URL is dropped from the message; it may carry credentials.
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::Network(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_detection() {
        assert!(LLMError::RateLimited.is_rate_limit());
        assert!(LLMError::ApiError {
            status: 429,
            message: "quota".to_string()
        }
        .is_rate_limit());
        assert!(LLMError::RequestFailed("upstream said 429 Too Many Requests".to_string())
            .is_rate_limit());

        assert!(!LLMError::ApiError {
            status: 500,
            message: "boom".to_string()
        }
        .is_rate_limit());
        assert!(!LLMError::Network("connection reset".to_string()).is_rate_limit());
        assert!(!LLMError::MissingApiKey("GEMINI_API_KEY").is_rate_limit());
    }

    #[test]
    fn test_incidental_429_is_not_rate_limit() {
        assert!(!LLMError::ParseError("expected value at line 1 column 429".to_string())
            .is_rate_limit());
        assert!(!LLMError::Network("error sending request for url (http://h:429/)".to_string())
            .is_rate_limit());
        assert!(LLMError::ApiError {
            status: 503,
            message: "upstream 429: quota exceeded".to_string()
        }
        .is_rate_limit());
    }

    #[tokio::test]
    async fn test_network_error_omits_url() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/v1beta/models?key=AIzaSECRETKEY123")
            .send()
            .await
            .unwrap_err();

        let err = LLMError::from(err);
        assert!(matches!(err, LLMError::Network(_)));
        assert!(!err.to_string().contains("AIzaSECRETKEY123"));
    }
}
