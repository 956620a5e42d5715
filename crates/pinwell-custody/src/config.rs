//! Provider configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration against a local provider.

use pinwell_shared::constants::{DEFAULT_CUSTODY_TIMEOUT_SECS, DEFAULT_CUSTODY_URL};

/// Content-custody provider configuration.
#[derive(Debug, Clone)]
pub struct CustodyConfig {
    /// Base URL of the provider HTTP API.
    /// Env: `PINWELL_CUSTODY_URL`
    /// Default: `http://127.0.0.1:8080`
    pub base_url: String,

    /// Bearer token sent with every request, if the provider requires one.
    /// Env: `PINWELL_CUSTODY_TOKEN`
    /// Default: none.
    pub auth_token: Option<String>,

    /// Per-request timeout in seconds.
    /// Env: `PINWELL_CUSTODY_TIMEOUT_SECS`
    /// Default: `30`
    pub timeout_secs: u64,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CUSTODY_URL.to_string(),
            auth_token: None,
            timeout_secs: DEFAULT_CUSTODY_TIMEOUT_SECS,
        }
    }
}

impl CustodyConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PINWELL_CUSTODY_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }

        if let Ok(token) = std::env::var("PINWELL_CUSTODY_TOKEN") {
            if !token.is_empty() {
                config.auth_token = Some(token);
            }
        }

        if let Ok(val) = std::env::var("PINWELL_CUSTODY_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid PINWELL_CUSTODY_TIMEOUT_SECS, using default"
                    );
                }
            }
        }

        config
    }

    /// Base URL with any trailing slash removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CustodyConfig::default();
        assert_eq!(config.base_url, DEFAULT_CUSTODY_URL);
        assert_eq!(config.timeout_secs, DEFAULT_CUSTODY_TIMEOUT_SECS);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_normalized_base_url_strips_trailing_slash() {
        let config = CustodyConfig {
            base_url: "https://custody.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://custody.example.com");
    }
}
