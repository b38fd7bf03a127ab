//! Configuration for the advisory service.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Top-level advisory configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub service: ServiceSection,
    pub gateway: GatewaySection,
}

impl AdvisorConfig {
    /// Parse config from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Load config from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }
}

/// Service identity and mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub service_id: String,
    /// Never contact the gateway
    pub local_only: bool,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            service_id: uuid::Uuid::new_v4().to_string(),
            local_only: false,
        }
    }
}

/// Remote model gateway settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySection {
    /// OpenAI-compatible API root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_ms: 30_000,
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

impl GatewaySection {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AdvisorConfig::default();
        assert!(!config.service.local_only);
        assert_eq!(config.gateway.timeout(), Duration::from_secs(30));
        assert_eq!(config.gateway.max_tokens, 1500);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AdvisorConfig::from_yaml(
            "service:\n  service_id: koraput-desk\n  local_only: true\ngateway:\n  timeout_ms: 2500\n",
        )
        .unwrap();

        assert_eq!(config.service.service_id, "koraput-desk");
        assert!(config.service.local_only);
        assert_eq!(config.gateway.timeout_ms, 2500);
        assert_eq!(config.gateway.model, "gpt-4o-mini");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = AdvisorConfig::default();
        config.gateway.model = "llama3.2".to_string();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(AdvisorConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gateway:\n  base_url: http://localhost:11434/v1").unwrap();

        let config = AdvisorConfig::load(file.path()).unwrap();
        assert_eq!(config.gateway.base_url, "http://localhost:11434/v1");

        let missing = AdvisorConfig::load("/nonexistent/forest-advisor.yaml");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
