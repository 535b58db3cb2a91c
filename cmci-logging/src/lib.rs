//! Logging initialisation for the CMCI client
//!
//! The client crates only emit `tracing` events; installing a subscriber is
//! left to the embedding application, which can use the helpers here.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
