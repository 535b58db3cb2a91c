//! Resource operations for CICS over the CMCI REST API
//!
//! Every operation checks its required parameters before anything is sent,
//! builds the resource URI and request body for its resource table, and
//! hands both to a [`CmciRestClient`]. Failures propagate unchanged.

pub mod cache;
pub(crate) mod common;
pub mod csd_group;
pub mod local_file;
pub mod program;
pub mod resource;
pub mod transaction;
pub mod types;
pub mod urimap;
pub mod webservice;

#[cfg(test)]
pub(crate) mod test_support;

use cmci_client::{enrich_transport_error, CmciResult, XmlCodec};
use cmci_config::CmciConfig;
use cmci_http::CmciSession;
use std::sync::Arc;

// Re-export main types for convenience
pub use cache::ResultCachePager;
pub use cmci_client::{CmciError, CmciResponse, CmciRestClient, RequestOptions};
pub use csd_group::{add_csd_group_to_list, remove_csd_group_from_list};
pub use local_file::{close_local_file, disable_local_file, enable_local_file, open_local_file};
pub use program::{
    define_program, delete_program, disable_program, discard_program, enable_program,
    install_program, program_newcopy, program_phasein,
};
pub use resource::{get_cache, get_resource, put_resource};
pub use transaction::{
    define_transaction, delete_transaction, disable_transaction, discard_transaction,
    enable_transaction, install_transaction,
};
pub use types::{
    CacheParms, CsdGroupParms, LocalFileParms, ProgramParms, ResourceParms, Scoped,
    TransactionParms, UrimapParms, WebServiceParms,
};
pub use urimap::{
    define_urimap_client, define_urimap_pipeline, define_urimap_server, delete_urimap,
    disable_urimap, discard_urimap, enable_urimap, install_urimap,
};
pub use webservice::{define_webservice, delete_webservice, install_webservice};

/// Build a client over a `reqwest` session for the configured connection
pub fn client_from_config(config: &CmciConfig) -> CmciResult<CmciRestClient> {
    let codec = XmlCodec::default();
    let session = CmciSession::from_config(config)
        .map_err(|error| enrich_transport_error(error, &codec))?;
    Ok(CmciRestClient::new(Arc::new(session)).with_codec(codec))
}
