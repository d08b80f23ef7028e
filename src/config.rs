//! Configuration management for rjmx-mapper
//!
//! Handles loading and validating configuration from YAML files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::collector::{HttpMethod, JmxMapping, JolokiaHttpClient};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Jolokia endpoint configuration
    #[serde(default)]
    pub jolokia: JolokiaConfig,

    /// MBean attribute mappings
    #[serde(default)]
    pub mappings: Vec<JmxMapping>,
}

/// Jolokia endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JolokiaConfig {
    /// Jolokia endpoint URL
    #[serde(default = "default_jolokia_url")]
    pub url: String,

    /// HTTP method used for read requests ("GET" or anything else for POST)
    #[serde(default = "default_http_method")]
    pub http_method: String,
}

// Default value functions
fn default_jolokia_url() -> String {
    "http://localhost:8778/jolokia".to_string()
}

fn default_http_method() -> String {
    HttpMethod::Post.as_str().to_string()
}

impl Default for JolokiaConfig {
    fn default() -> Self {
        Self {
            url: default_jolokia_url(),
            http_method: default_http_method(),
        }
    }
}

impl JolokiaConfig {
    /// Request client selected by `http_method`
    pub fn client(&self) -> JolokiaHttpClient {
        JolokiaHttpClient::new(&self.http_method)
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// The result is not validated; call [`Config::validate`] once CLI and
    /// environment overrides have been applied.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string without validating it
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load configuration from a YAML file, falling back to defaults if not found
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Apply CLI/environment overrides on top of file values
    pub fn apply_overrides(&mut self, jolokia_url: Option<String>, http_method: Option<String>) {
        if let Some(url) = jolokia_url {
            self.jolokia.url = url;
        }
        if let Some(method) = http_method {
            self.jolokia.http_method = method;
        }
    }

    /// Validate the configuration
    ///
    /// MBean name syntax is checked when requests are built, not here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.jolokia.url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "Invalid Jolokia URL '{}': {}",
                self.jolokia.url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "Jolokia URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        for (index, mapping) in self.mappings.iter().enumerate() {
            if mapping.mbean.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Mapping at index {} has an empty mbean",
                    index
                )));
            }

            if mapping.attributes.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Mapping '{}' must declare at least one attribute",
                    mapping.mbean
                )));
            }

            if mapping.attributes.iter().any(|a| a.attr.trim().is_empty()) {
                return Err(ConfigError::ValidationError(format!(
                    "Mapping '{}' has an attribute with an empty name",
                    mapping.mbean
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{Attribute, Target};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.jolokia.url, "http://localhost:8778/jolokia");
        assert_eq!(config.jolokia.http_method, "POST");
        assert!(config.mappings.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
jolokia:
  url: "http://localhost:8778/jolokia"
  http_method: GET
mappings:
  - mbean: "java.lang:type=Runtime"
    attributes:
      - attr: Uptime
        field: uptime
  - mbean: "java.lang:type=GarbageCollector,name=ConcurrentMarkSweep"
    attributes:
      - attr: CollectionTime
        field: gc.cms_collection_time
        event: gc
    target:
      url: "service:jmx:rmi:///jndi/rmi://targethost:9999/jmxrmi"
      user: jolokia
      password: secret
"#;

        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.jolokia.client().method(), HttpMethod::Get);
        assert_eq!(config.mappings.len(), 2);
        assert_eq!(
            config.mappings[1].attributes[0],
            Attribute::new("CollectionTime")
                .with_field("gc.cms_collection_time")
                .with_event("gc")
        );
        assert_eq!(
            config.mappings[1].target,
            Target {
                url: "service:jmx:rmi:///jndi/rmi://targethost:9999/jmxrmi".to_string(),
                user: "jolokia".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = Config::default();
        config.jolokia.url = "localhost:8778".to_string();
        assert!(config.validate().is_err());

        config.jolokia.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_mappings() {
        let mut config = Config::default();
        config.mappings = vec![JmxMapping::new("java.lang:type=Runtime")];
        assert!(config.validate().is_err());

        config.mappings = vec![JmxMapping::new(" ").with_attribute(Attribute::new("Uptime"))];
        assert!(config.validate().is_err());

        config.mappings =
            vec![JmxMapping::new("java.lang:type=Runtime").with_attribute(Attribute::new(""))];
        assert!(config.validate().is_err());

        config.mappings = vec![
            JmxMapping::new("java.lang:type=Runtime").with_attribute(Attribute::new("Uptime"))
        ];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied_before_validation() {
        let yaml = "jolokia:\n  url: \"localhost:8778\"\n  http_method: POST\n";
        let mut config = Config::from_yaml(yaml).unwrap();
        assert!(config.validate().is_err());

        config.apply_overrides(
            Some("http://good:8778/jolokia".to_string()),
            Some("GET".to_string()),
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.jolokia.url, "http://good:8778/jolokia");
        assert_eq!(config.jolokia.client().method(), HttpMethod::Get);
    }

    #[test]
    fn test_apply_overrides_keeps_file_values_when_absent() {
        let mut config = Config::from_yaml("jolokia:\n  http_method: GET\n").unwrap();
        config.apply_overrides(None, None);
        assert_eq!(config.jolokia.url, "http://localhost:8778/jolokia");
        assert_eq!(config.jolokia.http_method, "GET");
    }

    #[test]
    fn test_missing_method_defaults_to_post() {
        let config = Config::from_yaml("jolokia:\n  url: \"http://host:8778/jolokia\"\n").unwrap();
        assert_eq!(config.jolokia.client().method(), HttpMethod::Post);
    }
}
