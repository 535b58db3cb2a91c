//! Mock-transport clients for operation tests

use cmci_client::{CmciRestClient, HttpMethod};
use cmci_http::testing::{summary_xml, MockTransport};
use std::sync::Arc;

/// Client expecting exactly one request with this method, resource and body
pub(crate) fn expect_request(method: HttpMethod, resource: &str, body: Option<&str>) -> CmciRestClient {
    let resource = resource.to_string();
    let body = body.map(str::to_string);

    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(move |request| {
            request.method == method && request.resource == resource && request.body == body
        })
        .times(1)
        .returning(|_| Ok(summary_xml("1024", "0")));
    CmciRestClient::new(Arc::new(transport))
}

/// Client whose transport must never be reached
pub(crate) fn unreachable_client() -> CmciRestClient {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    CmciRestClient::new(Arc::new(transport))
}

/// Client answering every request with the given body
pub(crate) fn responding_with(body: &str) -> CmciRestClient {
    let body = body.to_string();
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .returning(move |_| Ok(body.clone()));
    CmciRestClient::new(Arc::new(transport))
}
