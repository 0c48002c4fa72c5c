use serde::Deserialize;
use std::path::Path;
use crate::error::{GatewayError, Result};

pub const API_TOKEN_ENV: &str = "ZABBIX_API_TOKEN";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub zabbix: ZabbixConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ZabbixConfig {
    /// Full URL of api_jsonrpc.php
    pub url: String,
    pub timeout_seconds: Option<u64>,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(skip)]
    pub api_token: Option<String>,
}

fn default_verify_ssl() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path() -> String {
    "/api_csv".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(GatewayError::Config(format!(
                "Configuration file not found: {}\n\nPlease create a config.yaml file or specify the path with --config.\nYou can use config.yaml.example as a template.",
                config_path.display()
            )));
        }

        let config_content = std::fs::read_to_string(config_path)
            .map_err(|e| GatewayError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            )))?;

        let mut settings = Self::from_yaml(&config_content)?;

        // The token never lives in the YAML file
        settings.zabbix.api_token = std::env::var(API_TOKEN_ENV)
            .ok()
            .or_else(|| {
                dotenv::dotenv().ok();
                std::env::var(API_TOKEN_ENV).ok()
            });

        settings.validate()?;

        Ok(settings)
    }

    /// Parse settings without touching the environment or validating
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.zabbix.url.is_empty() {
            return Err(GatewayError::Validation(
                "zabbix.url cannot be empty".to_string(),
            ));
        }

        if !self.zabbix.url.starts_with("http://") && !self.zabbix.url.starts_with("https://") {
            return Err(GatewayError::Validation(
                "zabbix.url must start with http:// or https://".to_string(),
            ));
        }

        if self.zabbix.api_token.as_deref().map_or(true, str::is_empty) {
            return Err(GatewayError::Validation(format!(
                "{} environment variable is required",
                API_TOKEN_ENV
            )));
        }

        if self.zabbix.timeout_seconds == Some(0) {
            return Err(GatewayError::Validation(
                "zabbix.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if !self.server.path.starts_with('/') {
            return Err(GatewayError::Validation(format!(
                "server.path '{}' must start with /",
                self.server.path
            )));
        }

        if self.server.path == "/health" {
            return Err(GatewayError::Validation(
                "server.path cannot be /health, it is reserved for liveness checks".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(GatewayError::Validation(format!(
                    "logging.format must be 'pretty' or 'json', got '{}'",
                    other
                )));
            }
        }

        Ok(())
    }

    /// Address the HTTP gateway binds to
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
