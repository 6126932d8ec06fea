//! Console configuration resolved from CLI arguments and the environment.

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const API_URL_ENV: &str = "PETCARE_API_URL";
pub const LOG_LEVEL_ENV: &str = "PETCARE_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("API URL is empty; pass --api-url or set {API_URL_ENV}")]
    EmptyApiUrl,
    #[error("API URL must start with http:// or https://: {0}")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
}

impl ConsoleConfig {
    /// Validate and normalize the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is blank or not http(s).
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let trimmed = api_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        let lower = trimmed.to_ascii_lowercase();
        if !lower.starts_with("http://") && !lower.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
        }
        let api_url = trimmed.trim_end_matches('/').to_owned();
        if api_url.ends_with(':') {
            return Err(ConfigError::UnsupportedScheme(trimmed.to_owned()));
        }
        Ok(Self { api_url })
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { api_url: DEFAULT_API_URL.to_owned() }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
