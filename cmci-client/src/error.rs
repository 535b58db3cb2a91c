//! Error taxonomy for CMCI requests
//!
//! - [`ValidationError`]: a required parameter is missing or blank, raised
//!   before any request is sent
//! - [`TransportError`]: the HTTP call failed, with XML cause detail
//!   pretty-printed when it parses
//! - `RequestFailed` / [`CicsCmciRestError`]: the call succeeded but the
//!   result summary reports a failure
//! - [`XmlError`]: a response body could not be parsed

use crate::constants::CmciResponseCode;
use crate::expect::ValidationError;
use crate::response::CmciResponse;
use crate::xml::{XmlCodec, XmlError};
use cmci_http::HttpError;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Message of every result-summary failure
pub const REQUEST_FAILED_MESSAGE: &str = "Did not receive the expected response from CMCI REST API";

/// Banner prefixed to transport failures
pub const TRANSPORT_ERROR_BANNER: &str = "CICS CMCI REST API Error";

#[derive(Debug, Error)]
pub enum CmciError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Result summary rejected, reported with the full response dump
    #[error("{message}. Response details:\n{details}", message = REQUEST_FAILED_MESSAGE)]
    RequestFailed { details: String },

    /// Result summary rejected, reported with parsed fields
    #[error(transparent)]
    Rest(#[from] CicsCmciRestError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

impl CmciError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CmciError::Validation(_))
    }

    /// HTTP status for transport failures
    pub fn status(&self) -> Option<u16> {
        match self {
            CmciError::Transport(e) => e.status,
            _ => None,
        }
    }
}

pub type CmciResult<T> = Result<T, CmciError>;

/// Transport failure with its cause detail
#[derive(Debug, Error)]
pub struct TransportError {
    /// Message reported by the transport
    pub message: String,
    pub status: Option<u16>,
    /// Error body, pretty-printed JSON when it parsed as XML, raw otherwise
    pub cause_errors: Option<String>,
    #[source]
    pub source: HttpError,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n{}", TRANSPORT_ERROR_BANNER, self.message)?;
        if let Some(cause) = &self.cause_errors {
            write!(f, "\n{}", cause)?;
        }
        Ok(())
    }
}

/// Replace XML cause detail with its parsed form; leave anything else raw
pub fn enrich_transport_error(error: HttpError, codec: &XmlCodec) -> TransportError {
    let cause_errors = error.cause_errors().map(|cause| match codec.parse(cause) {
        Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| parsed.to_string()),
        Err(parse_error) => {
            debug!(
                "Encountered an error trying to parse causeErrors as XML - causeErrors is likely not XML format. {}",
                parse_error
            );
            cause.to_string()
        }
    });

    TransportError {
        message: error.to_string(),
        status: error.status(),
        cause_errors,
        source: error,
    }
}

/// Result-summary failure with individually parsed fields
#[derive(Debug, Clone, PartialEq, Error)]
pub struct CicsCmciRestError {
    pub message: String,
    pub response_1: Option<u32>,
    pub response_2: Option<u32>,
    pub response_1_alt: Option<String>,
    pub response_2_alt: Option<String>,
    pub feedback_resp: Option<u32>,
    pub feedback_resp_2: Option<u32>,
    pub feedback_action: Option<String>,
    pub eibfn_alt: Option<String>,
    pub response: CmciResponse,
}

impl CicsCmciRestError {
    pub fn from_response(message: impl Into<String>, response: CmciResponse) -> Self {
        let summary = response.result_summary().unwrap_or_default();
        let feedback = response.feedback().unwrap_or_default();
        let parse = |value: Option<&str>| value.and_then(|v| v.trim().parse::<u32>().ok());

        Self {
            message: message.into(),
            response_1: parse(Some(summary.api_response1.as_str())),
            response_2: parse(Some(summary.api_response2.as_str())),
            response_1_alt: summary.api_response1_alt,
            response_2_alt: summary.api_response2_alt,
            feedback_resp: parse(feedback.resp.as_deref()),
            feedback_resp_2: parse(feedback.resp2.as_deref()),
            feedback_action: feedback.action,
            eibfn_alt: feedback.eibfn_alt,
            response,
        }
    }

    pub fn response_code(&self) -> Option<CmciResponseCode> {
        self.response_1.and_then(CmciResponseCode::from_code)
    }

    /// Name for RESPONSE_1, preferring the server's own alias
    pub fn response_1_name(&self) -> Option<&str> {
        self.response_1_alt
            .as_deref()
            .or_else(|| self.response_code().map(|code| code.name()))
    }
}

fn write_code(f: &mut fmt::Formatter<'_>, label: &str, code: Option<u32>, alt: Option<&str>) -> fmt::Result {
    match (code, alt) {
        (Some(code), Some(alt)) => write!(f, "\n{}: {} ({})", label, code, alt),
        (Some(code), None) => write!(f, "\n{}: {}", label, code),
        (None, Some(alt)) => write!(f, "\n{}: {}", label, alt),
        (None, None) => Ok(()),
    }
}

impl fmt::Display for CicsCmciRestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        write_code(f, "RESPONSE_1", self.response_1, self.response_1_name())?;
        write_code(f, "RESPONSE_2", self.response_2, self.response_2_alt.as_deref())?;
        if let Some(resp) = self.feedback_resp {
            write!(f, "\nFEEDBACKRESP: {}", resp)?;
        }
        if let Some(resp2) = self.feedback_resp_2 {
            write!(f, "\nFEEDBACKRESP_2: {}", resp2)?;
        }
        if let Some(action) = &self.feedback_action {
            write!(f, "\nFEEDBACK_ACTION: {}", action)?;
        }
        if let Some(eibfn) = &self.eibfn_alt {
            write!(f, "\nEIBFN_ALT: {}", eibfn)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(body: &str) -> HttpError {
        HttpError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            cause_errors: body.to_string(),
        }
    }

    #[test]
    fn test_xml_cause_is_pretty_printed() {
        let error = enrich_transport_error(
            status_error(r#"<error code="42"><Message>bad region</Message></error>"#),
            &XmlCodec::new(),
        );
        let cause = error.cause_errors.as_deref().unwrap();
        assert!(cause.contains("\"message\": \"bad region\""));
        assert!(cause.contains("\"code\": \"42\""));
        assert_eq!(error.status, Some(500));

        let rendered = error.to_string();
        assert!(rendered.starts_with("CICS CMCI REST API Error:\nHTTP 500 Internal Server Error"));
        assert!(rendered.contains("bad region"));
    }

    #[test]
    fn test_non_xml_cause_is_kept_raw() {
        let error = enrich_transport_error(status_error("Service unavailable"), &XmlCodec::new());
        assert_eq!(error.cause_errors.as_deref(), Some("Service unavailable"));
        assert!(error.to_string().ends_with("\nService unavailable"));
    }

    #[test]
    fn test_no_cause_for_other_errors() {
        let error = enrich_transport_error(HttpError::InvalidUrl("x".to_string()), &XmlCodec::new());
        assert_eq!(error.cause_errors, None);
        assert_eq!(error.status, None);
        assert!(error.to_string().starts_with(TRANSPORT_ERROR_BANNER));
    }

    #[test]
    fn test_rest_error_fields() {
        let response = CmciResponse::new(json!({
            "response": {
                "resultsummary": {
                    "api_response1": "1041",
                    "api_response2": "1361",
                    "api_response1_alt": "INVALIDDATA",
                    "errors": {
                        "feedback": {
                            "resp": "16",
                            "resp2": "6",
                            "action": "CSDINSTALL",
                            "eibfn_alt": "CSD INSTALL"
                        }
                    }
                }
            }
        }));
        let error = CicsCmciRestError::from_response(REQUEST_FAILED_MESSAGE, response);
        assert_eq!(error.response_1, Some(1041));
        assert_eq!(error.response_2, Some(1361));
        assert_eq!(error.response_code(), Some(CmciResponseCode::InvalidData));
        assert_eq!(error.feedback_resp, Some(16));
        assert_eq!(error.feedback_resp_2, Some(6));
        assert_eq!(error.feedback_action.as_deref(), Some("CSDINSTALL"));
        assert_eq!(error.eibfn_alt.as_deref(), Some("CSD INSTALL"));

        let rendered = error.to_string();
        assert!(rendered.starts_with(REQUEST_FAILED_MESSAGE));
        assert!(rendered.contains("RESPONSE_1: 1041 (INVALIDDATA)"));
        assert!(rendered.contains("RESPONSE_2: 1361"));
        assert!(rendered.contains("FEEDBACK_ACTION: CSDINSTALL"));
    }

    #[test]
    fn test_rest_error_falls_back_to_known_code_name() {
        let response = CmciResponse::new(json!({
            "response": {"resultsummary": {"api_response1": "1028", "api_response2": "0"}}
        }));
        let error = CicsCmciRestError::from_response(REQUEST_FAILED_MESSAGE, response);
        assert!(error.to_string().contains("RESPONSE_1: 1028 (INVALIDPARM)"));
        assert_eq!(error.feedback_resp, None);
    }

    #[test]
    fn test_request_failed_message() {
        let error = CmciError::RequestFailed {
            details: "{\"api_response1\": \"1027\"}".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Did not receive the expected response from CMCI REST API. Response details:\n{\"api_response1\": \"1027\"}"
        );
        assert!(!error.is_validation());
    }
}
