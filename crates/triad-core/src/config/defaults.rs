//! Default values for Triad configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Search Defaults
// ============================================================================

/// Default Tavily API base URL.
pub const DEFAULT_SEARCH_URL: &str = "https://api.tavily.com";

/// Environment variable holding the Tavily API key.
pub const SEARCH_API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Maximum number of sources kept per search.
pub const MAX_SOURCES: usize = 3;

/// Search depth requested from the provider.
pub const DEFAULT_SEARCH_DEPTH: &str = "basic";

// ============================================================================
// Analyst Defaults
// ============================================================================

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model used by the analyst.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

/// Environment variable holding the Gemini API key.
pub const ANALYST_API_KEY_ENV: &str = "GEMINI_API_KEY";

// ============================================================================
// Structurer Defaults
// ============================================================================

/// Default Groq (OpenAI-compatible) API base URL.
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";

/// Default Groq model used by the structurer.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the Groq API key.
pub const STRUCTURER_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Sampling temperature for the structurer.
pub const DEFAULT_STRUCTURER_TEMPERATURE: f32 = 0.6;

/// Maximum tokens for LLM responses.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// ============================================================================
// Retry Defaults
// ============================================================================

/// Maximum attempts for a rate-limited analyst call.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Linear backoff step in seconds (10s, 20s, 30s, ...).
pub const DEFAULT_RETRY_BASE_DELAY_SECS: u64 = 10;

/// Upper bound for the retry delay step (one hour).
pub const MAX_RETRY_BASE_DELAY_SECS: u64 = 3600;

// ============================================================================
// Output Defaults
// ============================================================================

/// Directory reports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Prefix of every report file name.
pub const DEFAULT_REPORT_PREFIX: &str = "Report_";

/// Extension of every report file.
pub const DEFAULT_REPORT_EXTENSION: &str = "md";

/// Maximum length of the sanitized query part of a report file name.
pub const MAX_FILENAME_LEN: usize = 50;

// ============================================================================
// HTTP Defaults
// ============================================================================

/// Request timeout for provider calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Connect timeout for provider calls.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Config File Defaults
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "triad.toml";

/// Directory name under the user config dir.
pub const USER_CONFIG_DIR: &str = "triad";

/// Config file name under the user config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";
