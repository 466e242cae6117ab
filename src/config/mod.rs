//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the path of the YAML configuration file
pub const CONFIG_ENV_VAR: &str = "UFUND_CONFIG";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Receipt email settings; receipts are disabled when absent
    #[serde(default)]
    pub email: Option<EmailConfig>,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the file named by `UFUND_CONFIG`, or use the defaults
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                tracing::info!(path = ?path, "loading configuration");
                Self::from_yaml_file(path)
            }
            None => {
                tracing::info!("no {CONFIG_ENV_VAR} set, using default configuration");
                Ok(Self::default())
            }
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,

    /// Origins allowed by CORS; empty means no CORS layer
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    /// `host:port` as given to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            allowed_origins: Vec::new(),
        }
    }
}

/// Locations of the backing JSON files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub toys: PathBuf,
    pub users: PathBuf,
    pub baskets: PathBuf,
    pub applications: PathBuf,
    pub partners: PathBuf,
}

impl StorageConfig {
    /// All five files under `dir`, with their default names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            toys: dir.join("toys.json"),
            users: dir.join("users.json"),
            baskets: dir.join("baskets.json"),
            applications: dir.join("applications.json"),
            partners: dir.join("partners.json"),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir("data")
    }
}

/// SMTP settings for receipt emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,

    #[serde(default = "EmailConfig::default_port")]
    pub smtp_port: u16,

    pub smtp_username: String,

    #[serde(default, skip_serializing)]
    pub smtp_password: String,

    pub from_address: String,

    #[serde(default = "EmailConfig::default_subject")]
    pub subject: String,
}

impl EmailConfig {
    pub const DEFAULT_SUBJECT: &'static str = "Smiles Unlimited Receipt";

    fn default_port() -> u16 {
        587
    }

    fn default_subject() -> String {
        Self::DEFAULT_SUBJECT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert!(config.server.allowed_origins.is_empty());
        assert_eq!(config.storage.toys, PathBuf::from("data/toys.json"));
        assert!(config.email.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
server:
  port: 9000
storage:
  toys: /srv/ufund/toys.json
"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.storage.toys, PathBuf::from("/srv/ufund/toys.json"));
        assert_eq!(config.storage.partners, PathBuf::from("data/partners.json"));
    }

    #[test]
    fn test_email_defaults_and_password_not_serialized() {
        let config = AppConfig::from_yaml_str(
            r#"
email:
  smtp_host: smtp.example.com
  smtp_username: mailer
  smtp_password: hunter2
  from_address: receipts@example.com
"#,
        )
        .unwrap();

        let email = config.email.unwrap();
        assert_eq!(email.smtp_port, 587);
        assert_eq!(email.subject, EmailConfig::DEFAULT_SUBJECT);
        assert_eq!(email.smtp_password, "hunter2");

        let yaml = serde_yaml::to_string(&email).unwrap();
        assert!(!yaml.contains("hunter2"));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(AppConfig::from_yaml_str("server: [").is_err());
    }
}
