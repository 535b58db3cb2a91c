//! HTTP transport for the CMCI client
//!
//! This crate owns the session the CMCI client talks through: the verbs CMCI
//! uses, the transport trait the protocol layer depends on, and a `reqwest`
//! implementation configured from `cmci-config`.

pub mod errors;
pub mod session;
pub mod types;

#[cfg(feature = "testing")]
pub mod testing;

// Re-export main types for convenience
pub use errors::HttpError;
pub use session::{CmciSession, CmciTransport, TransportRequest};
pub use types::HttpMethod;
