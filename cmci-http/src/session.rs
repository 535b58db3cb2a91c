//! Session and transport for CMCI requests

use crate::errors::HttpError;
use crate::types::HttpMethod;
use async_trait::async_trait;
use cmci_config::{CmciConfig, ConnectionConfig, HttpConfig};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client,
};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// A single request handed to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    /// Server-relative resource path including any query string
    pub resource: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    pub fn new(method: HttpMethod, resource: impl Into<String>) -> Self {
        Self {
            method,
            resource: resource.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }
}

/// Transport the CMCI client issues requests through.
///
/// Implementations return the raw response body for 2xx responses and an
/// [`HttpError`] for everything else.
#[async_trait]
pub trait CmciTransport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<String, HttpError>;
}

/// `reqwest`-backed session against one CMCI server
#[derive(Clone)]
pub struct CmciSession {
    base_url: String,
    client: Client,
    user: Option<String>,
    password: Option<String>,
}

impl fmt::Debug for CmciSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmciSession")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl CmciSession {
    /// Create a session from connection and HTTP settings
    pub fn new(connection: &ConnectionConfig, http: &HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating CMCI session for {} with timeout: {}s",
            connection.base_url(),
            http.timeout.as_secs()
        );

        let base_url = connection.base_url();
        url::Url::parse(&base_url).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .use_rustls_tls()
            .timeout(http.timeout)
            .connect_timeout(http.connection_pool.connection_timeout)
            .pool_idle_timeout(http.connection_pool.idle_timeout)
            .pool_max_idle_per_host(http.connection_pool.max_idle_per_host)
            .user_agent(&http.user_agent)
            .danger_accept_invalid_certs(!connection.reject_unauthorized)
            .build()?;

        Ok(Self {
            base_url,
            client,
            user: connection.user.clone(),
            password: connection.password.clone(),
        })
    }

    /// Create a session from a complete configuration
    pub fn from_config(config: &CmciConfig) -> Result<Self, HttpError> {
        Self::new(&config.connection, &config.http)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, HttpError> {
        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_str(key)
                .map_err(|_| HttpError::InvalidHeaderName(key.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeaderValue(key.to_string()))?;
            header_map.insert(name, value);
        }
        Ok(header_map)
    }
}

#[async_trait]
impl CmciTransport for CmciSession {
    async fn send(&self, request: TransportRequest) -> Result<String, HttpError> {
        let url = format!("{}{}", self.base_url, request.resource);
        info!("Making {} request to: {}", request.method, url);

        let mut header_map = Self::header_map(&request.headers)?;
        if request.body.is_some() && !header_map.contains_key(CONTENT_TYPE) {
            header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        }

        let mut builder = self
            .client
            .request(reqwest::Method::from(request.method), &url)
            .headers(header_map);

        if let Some(user) = &self.user {
            builder = builder.basic_auth(user, self.password.as_ref());
        }

        if let Some(body) = request.body {
            debug!("Adding {} byte XML body to request", body.len());
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_string();
        info!("HTTP response received: {} {}", status.as_u16(), status_text);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                status_text,
                cause_errors: text,
            });
        }

        debug!("Response body: {} bytes", text.len());
        Ok(text)
    }
}
