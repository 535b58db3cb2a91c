//! Result-summary verification
//!
//! HTTP status says nothing about whether CMCI carried out a request; the
//! embedded `resultsummary` codes do.

use crate::client::RequestOptions;
use crate::error::{CicsCmciRestError, CmciError, CmciResult, REQUEST_FAILED_MESSAGE};
use crate::response::CmciResponse;
use tracing::debug;

/// Accept a response whose summary is OK/0, or NODATA/0 when allowed
pub fn verify(response: CmciResponse, options: &RequestOptions) -> CmciResult<CmciResponse> {
    let summary = response.result_summary();

    let accepted = match &summary {
        Some(summary) if summary.is_ok() => true,
        Some(summary) if summary.is_no_data() && !options.fail_on_no_data => {
            debug!("CMCI returned NODATA, accepting as empty result");
            true
        }
        _ => false,
    };

    if accepted {
        return Ok(response);
    }

    if options.use_cics_cmci_rest_error {
        Err(CmciError::Rest(CicsCmciRestError::from_response(
            REQUEST_FAILED_MESSAGE,
            response,
        )))
    } else {
        Err(CmciError::RequestFailed {
            details: response.to_pretty_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CmciResponseCode;
    use serde_json::json;

    fn response(api_response1: &str, api_response2: &str) -> CmciResponse {
        CmciResponse::new(json!({
            "response": {
                "resultsummary": {
                    "api_response1": api_response1,
                    "api_response2": api_response2
                }
            }
        }))
    }

    #[test]
    fn test_ok_is_returned_unchanged() {
        let ok = response("1024", "0");
        assert_eq!(verify(ok.clone(), &RequestOptions::default()).unwrap(), ok);
    }

    #[test]
    fn test_every_other_pair_is_rejected() {
        for (r1, r2) in [
            ("1027", "0"),
            ("1024", "1"),
            ("1028", "0"),
            ("1034", "0"),
            ("1041", "0"),
            ("", ""),
            ("OK", "0"),
        ] {
            let err = verify(response(r1, r2), &RequestOptions::default()).unwrap_err();
            assert!(matches!(err, CmciError::RequestFailed { .. }), "{} {}", r1, r2);
        }
    }

    #[test]
    fn test_no_data_message_contains_code() {
        let err = verify(response("1027", "0"), &RequestOptions::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Did not receive the expected response from CMCI REST API"));
        assert!(message.contains("1027"));
    }

    #[test]
    fn test_missing_summary_is_rejected() {
        let err = verify(
            CmciResponse::new(json!({"response": {}})),
            &RequestOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CmciError::RequestFailed { .. }));
    }

    #[test]
    fn test_no_data_accepted_when_allowed() {
        let options = RequestOptions::default().fail_on_no_data(false);
        assert!(verify(response("1027", "0"), &options).is_ok());
        assert!(verify(response("1027", "1"), &options).is_err());
        assert!(verify(response("1028", "0"), &options).is_err());
    }

    #[test]
    fn test_structured_error_mode() {
        let options = RequestOptions::default().use_cics_cmci_rest_error(true);
        match verify(response("1028", "0"), &options).unwrap_err() {
            CmciError::Rest(error) => {
                assert_eq!(error.response_code(), Some(CmciResponseCode::InvalidParm));
                assert_eq!(error.response_2, Some(0));
                assert!(error.to_string().contains("INVALIDPARM"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
