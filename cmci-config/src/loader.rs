//! Configuration loading and environment variable handling

use crate::domains::CmciConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "CMCI".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<CmciConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: CmciConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<CmciConfig> {
        let mut config = CmciConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<CmciConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut CmciConfig) -> ConfigResult<()> {
        self.apply_connection_overrides(&mut config.connection)?;
        self.apply_http_overrides(&mut config.http)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply connection config overrides
    fn apply_connection_overrides(
        &self,
        config: &mut crate::domains::connection::ConnectionConfig,
    ) -> ConfigResult<()> {
        if let Ok(host) = self.get_env_var("HOST") {
            config.host = host;
        }

        if let Ok(port) = self.get_env_var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid PORT: {}", e)))?;
        }

        if let Ok(protocol) = self.get_env_var("PROTOCOL") {
            config.protocol = crate::domains::connection::Protocol::from_str(&protocol)
                .map_err(|_| ConfigError::EnvError(format!("Invalid PROTOCOL: {}", protocol)))?;
        }

        if let Ok(user) = self.get_env_var("USER") {
            config.user = Some(user);
        }

        if let Ok(password) = self.get_env_var("PASSWORD") {
            config.password = Some(password);
        }

        if let Ok(reject) = self.get_env_var("REJECT_UNAUTHORIZED") {
            config.reject_unauthorized = reject.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid REJECT_UNAUTHORIZED: {}", e))
            })?;
        }

        if let Ok(region) = self.get_env_var("REGION_NAME") {
            config.region_name = Some(region);
        }

        if let Ok(plex) = self.get_env_var("CICS_PLEX") {
            config.cics_plex = Some(plex);
        }

        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
