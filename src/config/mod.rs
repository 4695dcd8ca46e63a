//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file (path in
//! `BAKEHOUSE_CONFIG`) with environment variables taking precedence over
//! file values. Every field has a default, so the service starts with no
//! configuration at all.

use crate::auth::token::DEFAULT_TOKEN_TTL_SECS;
use crate::core::catalog::DEFAULT_LOW_STOCK_THRESHOLD;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// The one low-stock cutoff, consumed by the admin inventory view and
    /// the stock-alert path alike
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
}

/// Document database settings (used with the `mongodb_backend` feature)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_uri")]
    pub uri: String,

    #[serde(default = "default_db_name")]
    pub name: String,
}

/// Bearer-credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; override it in any real deployment
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_db_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_db_name() -> String {
    "bakehouse".to_string()
}

fn default_jwt_secret() -> String {
    "development-secret-change-me".to_string()
}

fn default_token_ttl_secs() -> i64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: default_db_uri(),
            name: default_db_name(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the effective configuration: the file named by
    /// `BAKEHOUSE_CONFIG` (if set), then environment overrides on top.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BAKEHOUSE_CONFIG") {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the environment in production;
    /// injectable for tests).
    pub fn apply_overrides<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = get("BAKEHOUSE_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(uri) = get("BAKEHOUSE_DB_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = get("BAKEHOUSE_DB_NAME") {
            self.database.name = name;
        }
        if let Some(secret) = get("BAKEHOUSE_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(ttl) = get("BAKEHOUSE_TOKEN_TTL_SECS") {
            match ttl.parse() {
                Ok(parsed) => self.auth.token_ttl_secs = parsed,
                Err(_) => {
                    tracing::warn!(value = %ttl, "ignoring unparseable BAKEHOUSE_TOKEN_TTL_SECS")
                }
            }
        }
        if let Some(threshold) = get("BAKEHOUSE_LOW_STOCK_THRESHOLD") {
            match threshold.parse() {
                Ok(parsed) => self.low_stock_threshold = parsed,
                Err(_) => {
                    tracing::warn!(value = %threshold, "ignoring unparseable BAKEHOUSE_LOW_STOCK_THRESHOLD")
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.low_stock_threshold, 10);
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert_eq!(config.database.name, "bakehouse");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = AppConfig::from_yaml_str("low_stock_threshold: 4\n").unwrap();
        assert_eq!(config.low_stock_threshold, 4);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_nested_yaml() {
        let yaml = r#"
bind_addr: "0.0.0.0:9000"
auth:
  jwt_secret: "super-secret"
database:
  name: "bakehouse_test"
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.auth.jwt_secret, "super-secret");
        assert_eq!(config.database.name, "bakehouse_test");
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
    }

    #[test]
    fn test_yaml_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "low_stock_threshold: 7").unwrap();
        let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.low_stock_threshold, 7);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = AppConfig::from_yaml_str("low_stock_threshold: 4\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("BAKEHOUSE_LOW_STOCK_THRESHOLD", "25"),
            ("BAKEHOUSE_JWT_SECRET", "from-env"),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.low_stock_threshold, 25);
        assert_eq!(config.auth.jwt_secret, "from-env");
        // untouched fields keep their values
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| {
            (key == "BAKEHOUSE_LOW_STOCK_THRESHOLD").then(|| "not-a-number".to_string())
        });
        assert_eq!(config.low_stock_threshold, 10);
    }
}
