//! Mock transport for testing
//!
//! Enabled with the `testing` feature so that downstream crates can assert
//! exactly which requests reach the wire.

use async_trait::async_trait;
use mockall::mock;

use crate::{CmciTransport, HttpError, TransportRequest};

mock! {
    pub Transport {}

    #[async_trait]
    impl CmciTransport for Transport {
        async fn send(&self, request: TransportRequest) -> Result<String, HttpError>;
    }
}

/// Minimal CMCI envelope with the given result summary codes and no records
pub fn summary_xml(api_response1: &str, api_response2: &str) -> String {
    format!(
        r#"<response xmlns="http://www.ibm.com/xmlns/prod/CICS/smw2int" version="3.0"><resultsummary api_response1="{}" api_response2="{}" recordcount="0" displayed_recordcount="0"/></response>"#,
        api_response1, api_response2
    )
}
