//! CMCI connection configuration

use crate::error::ConfigResult;
use crate::validation::{validate_host, validate_port_range, Validatable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Connection settings for the CMCI server of a CICS region or CICSplex.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Host name of the CMCI server
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the CMCI server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Transport protocol
    #[serde(default)]
    pub protocol: Protocol,

    /// Mainframe user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Mainframe password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Reject self-signed or otherwise untrusted certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub reject_unauthorized: bool,

    /// Default region used when an operation does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// Default CICSplex used when an operation does not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cics_plex: Option<String>,
}

// Password stays out of Debug output
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("protocol", &self.protocol)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("reject_unauthorized", &self.reject_unauthorized)
            .field("region_name", &self.region_name)
            .field("cics_plex", &self.cics_plex)
            .finish()
    }
}

/// CMCI transport protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(format!("Invalid protocol: {}", s)),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            protocol: Protocol::default(),
            user: None,
            password: None,
            reject_unauthorized: true,
            region_name: None,
            cics_plex: None,
        }
    }
}

impl ConnectionConfig {
    /// Base URL of the CMCI server, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl Validatable for ConnectionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_port_range(self.port, "port", self.domain_name())?;
        validate_host(self.protocol.as_str(), &self.host, self.port, self.domain_name())?;

        // Credentials come as a pair or not at all
        if self.user.is_some() != self.password.is_some() {
            return Err(self.validation_error("user and password must be supplied together"));
        }

        if self.protocol == Protocol::Http && self.user.is_some() {
            log::warn!("credentials for {} will be sent over plain http", self.host);
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "connection"
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1490
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.protocol, Protocol::Https);
        assert_eq!(config.port, 1490);
        assert!(config.reject_unauthorized);
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://localhost:1490");
    }

    #[test]
    fn test_credentials_must_be_paired() {
        let config = ConnectionConfig {
            user: Some("IBMUSER".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("user and password must be supplied together"));
    }

    #[test]
    fn test_debug_masks_password() {
        let config = ConnectionConfig {
            user: Some("IBMUSER".to_string()),
            password: Some("SECRET".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("SECRET"));
        assert!(debug.contains("********"));
    }

    #[test]
    fn test_protocol_from_str() {
        assert_eq!("HTTP".parse::<Protocol>().unwrap(), Protocol::Http);
        assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
        assert!("ftp".parse::<Protocol>().is_err());
    }
}
