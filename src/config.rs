//! Startup configuration read from the process environment.
//!
//! A `.env` file next to the binary is loaded first during development; real
//! environment variables always win.

use crate::error::ConfigError;
use std::env;

pub const DEFAULT_AUTH_BRIDGE_URL: &str = "http://127.0.0.1:8787";
pub const DEFAULT_SYSTEM_STATUS: &str = "online";

#[derive(Clone, Debug, PartialEq)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub assistant: AssistantConfig,
    pub auth_bridge_url: String,
    pub system_status: String,
    pub initial_message: Option<String>,
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        tracing::debug!("no .env file found, using process environment");
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let endpoint = non_empty("BEACON_ASSISTANT_ENDPOINT")
            .ok_or(ConfigError::Missing("BEACON_ASSISTANT_ENDPOINT"))?;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "BEACON_ASSISTANT_ENDPOINT",
                message: format!("expected an http(s) URL, got {endpoint}"),
            });
        }

        Ok(Self {
            assistant: AssistantConfig {
                endpoint,
                model: non_empty("BEACON_ASSISTANT_MODEL"),
                api_key: non_empty("BEACON_ASSISTANT_API_KEY"),
            },
            auth_bridge_url: non_empty("BEACON_AUTH_BRIDGE_URL")
                .unwrap_or_else(|| DEFAULT_AUTH_BRIDGE_URL.to_string()),
            system_status: non_empty("BEACON_SYSTEM_STATUS")
                .unwrap_or_else(|| DEFAULT_SYSTEM_STATUS.to_string()),
            initial_message: non_empty("BEACON_INITIAL_MESSAGE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_assistant_endpoint() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BEACON_ASSISTANT_ENDPOINT")));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let err = AppConfig::from_lookup(lookup(&[("BEACON_ASSISTANT_ENDPOINT", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup(&[(
            "BEACON_ASSISTANT_ENDPOINT",
            "http://localhost:1/chat",
        )]))
        .unwrap();
        assert_eq!(config.auth_bridge_url, DEFAULT_AUTH_BRIDGE_URL);
        assert_eq!(config.system_status, DEFAULT_SYSTEM_STATUS);
        assert!(config.initial_message.is_none());
        assert!(config.assistant.model.is_none());
    }

    #[test]
    fn test_blank_values_treated_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BEACON_ASSISTANT_ENDPOINT", "https://api.example.com/chat"),
            ("BEACON_INITIAL_MESSAGE", "   "),
            ("BEACON_ASSISTANT_MODEL", "gpt-oss-120b"),
        ]))
        .unwrap();
        assert!(config.initial_message.is_none());
        assert_eq!(config.assistant.model.as_deref(), Some("gpt-oss-120b"));
    }
}
