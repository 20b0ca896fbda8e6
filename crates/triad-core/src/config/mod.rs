//! Configuration management for Triad.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `triad.toml` file
//! 3. User config `~/.config/triad/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! API keys are only ever read from the config file or the environment and
//! are never written back out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Web search provider configuration.
    pub search: SearchConfig,

    /// Analyst (Gemini) configuration.
    pub analyst: AnalystConfig,

    /// Structurer (Groq) configuration.
    pub structurer: StructurerConfig,

    /// Rate-limit retry configuration.
    pub retry: RetryConfig,

    /// Report output configuration.
    pub output: OutputConfig,

    /// HTTP client configuration shared by all providers.
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./triad.toml` (project local)
    /// 2. `~/.config/triad/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Credentials
        if let Some(key) = lookup(SEARCH_API_KEY_ENV) {
            self.search.api_key = Some(key);
        }
        if let Some(key) = lookup(ANALYST_API_KEY_ENV) {
            self.analyst.api_key = Some(key);
        }
        if let Some(key) = lookup(STRUCTURER_API_KEY_ENV) {
            self.structurer.api_key = Some(key);
        }

        // Endpoints and models
        if let Some(url) = lookup("TRIAD_SEARCH_URL") {
            self.search.base_url = url;
        }
        if let Some(model) = lookup("TRIAD_ANALYST_MODEL") {
            self.analyst.model = model;
        }
        if let Some(url) = lookup("TRIAD_ANALYST_URL") {
            self.analyst.base_url = url;
        }
        if let Some(model) = lookup("TRIAD_STRUCTURER_MODEL") {
            self.structurer.model = model;
        }
        if let Some(url) = lookup("TRIAD_STRUCTURER_URL") {
            self.structurer.base_url = url;
        }
        if let Some(temp) = lookup("TRIAD_STRUCTURER_TEMPERATURE") {
            if let Ok(t) = temp.parse() {
                self.structurer.temperature = t;
            }
        }

        // Retry overrides
        if let Some(attempts) = lookup("TRIAD_RETRY_ATTEMPTS") {
            if let Ok(n) = attempts.parse() {
                self.retry.max_attempts = n;
            }
        }
        if let Some(delay) = lookup("TRIAD_RETRY_BASE_DELAY_SECS") {
            if let Ok(n) = delay.parse() {
                self.retry.base_delay_secs = n;
            }
        }

        // Output overrides
        if let Some(dir) = lookup("TRIAD_OUTPUT_DIR") {
            self.output.dir = dir;
        }
    }

    /// Checks values that would make the pipeline misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.base_delay_secs > MAX_RETRY_BASE_DELAY_SECS {
            return Err(ConfigError::Invalid(format!(
                "retry.base_delay_secs must be at most {}, got {}",
                MAX_RETRY_BASE_DELAY_SECS, self.retry.base_delay_secs
            )));
        }
        if !(0.0..=2.0).contains(&self.structurer.temperature) {
            return Err(ConfigError::Invalid(format!(
                "structurer.temperature must be between 0 and 2, got {}",
                self.structurer.temperature
            )));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn non_blank(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty())
}

/// Web search provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Base URL of the Tavily API.
    pub base_url: String,

    /// API key (normally taken from `TAVILY_API_KEY`).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None,
        }
    }
}

impl SearchConfig {
    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        non_blank(self.api_key.clone())
            .or_else(|| non_blank(std::env::var(SEARCH_API_KEY_ENV).ok()))
    }
}

/// Analyst configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystConfig {
    /// Base URL of the Gemini API.
    pub base_url: String,

    /// Gemini model name.
    pub model: String,

    /// API key (normally taken from `GEMINI_API_KEY`).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl AnalystConfig {
    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        non_blank(self.api_key.clone())
            .or_else(|| non_blank(std::env::var(ANALYST_API_KEY_ENV).ok()))
    }
}

/// Structurer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructurerConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Model name.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Maximum tokens for the formatted report.
    pub max_tokens: u32,

    /// API key (normally taken from `GROQ_API_KEY`).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for StructurerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GROQ_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            temperature: DEFAULT_STRUCTURER_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_key: None,
        }
    }
}

impl StructurerConfig {
    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        non_blank(self.api_key.clone())
            .or_else(|| non_blank(std::env::var(STRUCTURER_API_KEY_ENV).ok()))
    }
}

/// Rate-limit retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts for a rate-limited call.
    pub max_attempts: u32,

    /// Linear backoff step in seconds.
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            base_delay_secs: DEFAULT_RETRY_BASE_DELAY_SECS,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory reports are written to.
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl OutputConfig {
    /// Get the output directory as a path.
    pub fn dir_path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Builds a `reqwest` client honouring the configured timeouts.
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .build()
    }
}
