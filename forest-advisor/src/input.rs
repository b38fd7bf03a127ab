//! Request and config loading for the CLI.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::info;

use forest_agent::AdvisorConfig;

/// Read a JSON request from `path`, or from stdin when no path is given.
pub fn read_request<T: DeserializeOwned>(path: Option<&Path>) -> anyhow::Result<T> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading request from stdin")?;
            buffer
        }
    };

    parse_request(&raw)
}

pub fn parse_request<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    serde_json::from_str(raw).context("request is not valid JSON for this command")
}

/// Load config from `path` when it exists, otherwise defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AdvisorConfig> {
    match path {
        Some(path) if path.exists() => {
            info!("Config file: {}", path.display());
            Ok(AdvisorConfig::load(path)?)
        }
        Some(path) => {
            info!("Config file {} not found, using defaults", path.display());
            Ok(AdvisorConfig::default())
        }
        None => Ok(AdvisorConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forest_agent::{FraudCheckRequest, RecommendationRequest};
    use std::io::Write;

    #[test]
    fn test_read_request_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"targetDescriptor": "women SHG", "landData": {{"population": 1200}}}}"#
        )
        .unwrap();

        let request: RecommendationRequest = read_request(Some(file.path())).unwrap();
        assert_eq!(request.target_descriptor.as_deref(), Some("women SHG"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_parse_request_rejects_garbage() {
        let result: anyhow::Result<FraudCheckRequest> = parse_request("not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forest-advisor.yaml");

        let defaults = load_config(Some(&path)).unwrap();
        assert!(!defaults.service.local_only);

        std::fs::write(&path, "service:\n  local_only: true\n").unwrap();
        let loaded = load_config(Some(&path)).unwrap();
        assert!(loaded.service.local_only);
    }
}
