//! CICS CMCI REST protocol client
//!
//! Everything between a resource operation and the HTTP transport lives here:
//!
//! - [`uri`] builds resource and result-cache URIs
//! - [`xml`] converts request envelopes to XML and parses responses
//! - [`verify`] classifies parsed responses by their result summary
//! - [`client`] runs the GET/PUT/POST/DELETE pipeline over a [`CmciTransport`]

pub mod client;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod expect;
pub mod response;
pub mod uri;
pub mod verify;
pub mod xml;

// Re-export main types for convenience
pub use client::{CmciRestClient, Header, RequestOptions};
pub use constants::CmciResponseCode;
pub use envelope::{Attributes, Parameter, Payload, RequestEnvelope};
pub use error::{
    enrich_transport_error, CicsCmciRestError, CmciError, CmciResult, TransportError,
    REQUEST_FAILED_MESSAGE, TRANSPORT_ERROR_BANNER,
};
pub use expect::ValidationError;
pub use response::{CmciResponse, Feedback, ResultSummary};
pub use uri::{build_cache_uri, build_resource_uri, CacheOptions, QueryFlags, ResourceContext};
pub use verify::verify;
pub use xml::{XmlCodec, XmlError};

pub use cmci_http::{CmciTransport, HttpMethod};
