//! CMCI REST client
//!
//! Each verb runs the same sequential pipeline: serialise the payload,
//! send it through the transport, enrich any transport failure, parse the
//! XML body and verify the result summary. Nothing is retried.

use crate::envelope::Payload;
use crate::error::{enrich_transport_error, CmciResult};
use crate::response::CmciResponse;
use crate::verify::verify;
use crate::xml::XmlCodec;
use cmci_http::{CmciTransport, HttpMethod, TransportRequest};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Extra HTTP header sent with a request
pub type Header = (String, String);

/// Per-request verification options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    /// Report result-summary failures as [`crate::CicsCmciRestError`]
    pub use_cics_cmci_rest_error: bool,
    /// Reject NODATA (1027/0) responses
    pub fail_on_no_data: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            use_cics_cmci_rest_error: false,
            fail_on_no_data: true,
        }
    }
}

impl RequestOptions {
    pub fn use_cics_cmci_rest_error(mut self, enabled: bool) -> Self {
        self.use_cics_cmci_rest_error = enabled;
        self
    }

    pub fn fail_on_no_data(mut self, enabled: bool) -> Self {
        self.fail_on_no_data = enabled;
        self
    }
}

/// Client for the CMCI REST API over an injected transport
#[derive(Clone)]
pub struct CmciRestClient {
    transport: Arc<dyn CmciTransport>,
    codec: XmlCodec,
    default_options: RequestOptions,
}

impl fmt::Debug for CmciRestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CmciRestClient")
            .field("codec", &self.codec)
            .field("default_options", &self.default_options)
            .finish_non_exhaustive()
    }
}

impl CmciRestClient {
    pub fn new(transport: Arc<dyn CmciTransport>) -> Self {
        Self {
            transport,
            codec: XmlCodec::default(),
            default_options: RequestOptions::default(),
        }
    }

    pub fn with_codec(mut self, codec: XmlCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Options applied when a call passes `None`
    pub fn with_request_options(mut self, options: RequestOptions) -> Self {
        self.default_options = options;
        self
    }

    pub fn codec(&self) -> &XmlCodec {
        &self.codec
    }

    pub fn default_options(&self) -> RequestOptions {
        self.default_options
    }

    pub async fn get_parsed(
        &self,
        resource: &str,
        headers: &[Header],
        options: Option<RequestOptions>,
    ) -> CmciResult<CmciResponse> {
        self.execute(HttpMethod::Get, resource, headers, None, options)
            .await
    }

    pub async fn delete_parsed(
        &self,
        resource: &str,
        headers: &[Header],
        options: Option<RequestOptions>,
    ) -> CmciResult<CmciResponse> {
        self.execute(HttpMethod::Delete, resource, headers, None, options)
            .await
    }

    pub async fn put_parsed(
        &self,
        resource: &str,
        headers: &[Header],
        payload: Option<&Payload>,
        options: Option<RequestOptions>,
    ) -> CmciResult<CmciResponse> {
        self.execute(HttpMethod::Put, resource, headers, payload, options)
            .await
    }

    pub async fn post_parsed(
        &self,
        resource: &str,
        headers: &[Header],
        payload: Option<&Payload>,
        options: Option<RequestOptions>,
    ) -> CmciResult<CmciResponse> {
        self.execute(HttpMethod::Post, resource, headers, payload, options)
            .await
    }

    async fn execute(
        &self,
        method: HttpMethod,
        resource: &str,
        headers: &[Header],
        payload: Option<&Payload>,
        options: Option<RequestOptions>,
    ) -> CmciResult<CmciResponse> {
        let options = options.unwrap_or(self.default_options);
        debug!(
            "Attempting CMCI {} on {} with headers {:?} and options {:?}",
            method, resource, headers, options
        );
        if let Some(payload) = payload {
            trace!("Outbound payload before conversion: {:?}", payload);
        }

        let body = payload.map(|payload| self.codec.to_xml(payload));
        let request = TransportRequest::new(method, resource)
            .with_headers(headers.to_vec())
            .with_body(body);

        let text = self
            .transport
            .send(request)
            .await
            .map_err(|error| enrich_transport_error(error, &self.codec))?;

        let parsed = self.codec.parse(&text)?;
        verify(CmciResponse::new(parsed), &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::RequestEnvelope;
    use crate::error::CmciError;
    use cmci_http::testing::{summary_xml, MockTransport};
    use cmci_http::HttpError;
    use mockall::predicate::eq;

    fn client(transport: MockTransport) -> CmciRestClient {
        CmciRestClient::new(Arc::new(transport))
    }

    #[tokio::test]
    async fn test_get_parses_and_verifies() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(eq(TransportRequest::new(
                HttpMethod::Get,
                "/CICSSystemManagement/CICSProgram/R1",
            )))
            .times(1)
            .returning(|_| {
                Ok(r#"<response><resultsummary api_response1="1024" api_response2="0" recordcount="1"/><records><cicsprogram program="PGM1"/></records></response>"#.to_string())
            });

        let response = client(transport)
            .get_parsed("/CICSSystemManagement/CICSProgram/R1", &[], None)
            .await
            .unwrap();
        assert_eq!(response.record_count(), 1);
        assert_eq!(response.records("cicsprogram")[0]["program"], "PGM1");
    }

    #[tokio::test]
    async fn test_put_serialises_envelope() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == HttpMethod::Put
                    && request.body.as_deref()
                        == Some(r#"<request><action name="NEWCOPY"/></request>"#)
                    && request.headers == vec![("X-Trace".to_string(), "1".to_string())]
            })
            .times(1)
            .returning(|_| Ok(summary_xml("1024", "0")));

        let payload = Payload::from(RequestEnvelope::action("NEWCOPY"));
        let headers = vec![("X-Trace".to_string(), "1".to_string())];
        client(transport)
            .put_parsed("/CICSSystemManagement/CICSProgram/R1", &headers, Some(&payload), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_raw_payload_sent_verbatim() {
        let raw = "<request><create/></request>";
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(move |request| {
                request.method == HttpMethod::Post && request.body.as_deref() == Some(raw)
            })
            .times(1)
            .returning(|_| Ok(summary_xml("1024", "0")));

        client(transport)
            .post_parsed("/x", &[], Some(&Payload::from(raw)), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_without_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.method == HttpMethod::Delete && request.body.is_none())
            .times(1)
            .returning(|_| Ok(summary_xml("1024", "0")));

        assert!(client(transport).delete_parsed("/x", &[], None).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_summary_is_rejected() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(summary_xml("1028", "0")));

        let err = client(transport).get_parsed("/x", &[], None).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Did not receive the expected response from CMCI REST API"));
        assert!(message.contains("1028"));
    }

    #[tokio::test]
    async fn test_default_options_apply_when_none_given() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(2)
            .returning(|_| Ok(summary_xml("1027", "0")));

        let client = client(transport)
            .with_request_options(RequestOptions::default().fail_on_no_data(false));
        assert!(client.get_parsed("/x", &[], None).await.is_ok());
        assert!(client
            .get_parsed("/x", &[], Some(RequestOptions::default()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_transport_error_is_enriched() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Err(HttpError::Status {
                status: 404,
                status_text: "Not Found".to_string(),
                cause_errors: "<Error><Reason>no such region</Reason></Error>".to_string(),
            })
        });

        match client(transport).get_parsed("/x", &[], None).await.unwrap_err() {
            CmciError::Transport(error) => {
                assert_eq!(error.status, Some(404));
                assert!(error.to_string().starts_with("CICS CMCI REST API Error:"));
                assert!(error
                    .cause_errors
                    .as_deref()
                    .unwrap()
                    .contains("\"reason\": \"no such region\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_xml_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok("<response><resultsummary>".to_string()));

        let err = client(transport).get_parsed("/x", &[], None).await.unwrap_err();
        assert!(matches!(err, CmciError::Xml(_)));
    }
}
