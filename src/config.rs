//! Client configuration and logging setup.

use std::env;

use tracing_subscriber::EnvFilter;

use crate::constants::{
    API_KEY_ENV_VARS, DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, ENDPOINT_ENV_VAR,
    MODEL_ENV_VAR,
};
use crate::error::ConfigError;

/// Everything the generation transport needs to reach the service.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }

    /// Reads the key from `GEMINI_API_KEY` or `API_KEY`, plus optional
    /// `GEMINI_MODEL` / `GEMINI_ENDPOINT` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey(API_KEY_ENV_VARS.join(" or ")))?;

        let mut config = Self::new(api_key);
        if let Some(model) = lookup(MODEL_ENV_VAR) {
            config = config.with_model(model);
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR) {
            config = config.with_endpoint(endpoint);
        }
        Ok(config)
    }

    /// Blank values keep the current model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        let model = model.trim();
        if !model.is_empty() {
            self.model = model.strip_prefix("models/").unwrap_or(model).to_string();
        }
        self
    }

    /// Blank values keep the current endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            self.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        self
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over `debug`.
pub fn setup_logging(debug: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{default_level},hyper_util=info,reqwest=info,h2=info,rustls=info"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("secret");
        assert_eq!(config.model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.endpoint, DEFAULT_GEMINI_ENDPOINT);
    }

    #[test]
    fn test_missing_api_key() {
        let err = ClientConfig::from_lookup(lookup_from(&[("API_KEY", "  ")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingApiKey("GEMINI_API_KEY or API_KEY".to_string())
        );
    }

    #[test]
    fn test_gemini_key_takes_precedence() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "primary");

        let config = ClientConfig::from_lookup(lookup_from(&[("API_KEY", "fallback")])).unwrap();
        assert_eq!(config.api_key, "fallback");
    }

    #[test]
    fn test_overrides_are_normalized() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("API_KEY", "k"),
            ("GEMINI_MODEL", "models/gemini-2.5-flash-image"),
            ("GEMINI_ENDPOINT", "http://localhost:8080/v1beta/models/"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash-image");
        assert_eq!(config.endpoint, "http://localhost:8080/v1beta/models");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config = ClientConfig::new("k").with_model(" ").with_endpoint("");
        assert_eq!(config.model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.endpoint, DEFAULT_GEMINI_ENDPOINT);
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
