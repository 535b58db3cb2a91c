//! Generic access to any CMCI resource table

use crate::common::{require, CACHE_TOKEN, REGION_NAME, RESOURCE_NAME};
use crate::types::{CacheParms, ResourceParms};
use cmci_client::{
    build_cache_uri, build_resource_uri, CacheOptions, CmciResponse, CmciRestClient, CmciResult,
    Payload, ResourceContext,
};
use tracing::debug;

fn resource_uri(parms: &ResourceParms) -> CmciResult<String> {
    let name = require(&parms.name, &RESOURCE_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    let context = ResourceContext {
        cics_plex: parms.cics_plex.clone(),
        region_name: Some(region_name.to_string()),
        criteria: parms.criteria.clone(),
        parameter: parms.parameter.clone(),
        query_flags: parms.query_flags,
    };
    Ok(build_resource_uri(name, &context)?)
}

/// GET records from any resource table
pub async fn get_resource(client: &CmciRestClient, parms: &ResourceParms) -> CmciResult<CmciResponse> {
    let uri = resource_uri(parms)?;
    debug!("Attempting to get resources with the following parameters:\n{:?}", parms);
    client.get_parsed(&uri, &[], parms.options).await
}

/// PUT an arbitrary request body against any resource table
pub async fn put_resource(
    client: &CmciRestClient,
    parms: &ResourceParms,
    payload: &Payload,
) -> CmciResult<CmciResponse> {
    let uri = resource_uri(parms)?;
    debug!("Attempting to put a resource with the following parameters:\n{:?}", parms);
    client.put_parsed(&uri, &[], Some(payload), parms.options).await
}

/// GET a page of a result cache
pub async fn get_cache(client: &CmciRestClient, parms: &CacheParms) -> CmciResult<CmciResponse> {
    let cache_token = require(&parms.cache_token, &CACHE_TOKEN)?;

    debug!("Attempting to get a result cache with the following parameters:\n{:?}", parms);

    let options = CacheOptions {
        start_index: parms.start_index,
        count: parms.count,
        nodiscard: parms.nodiscard,
        summonly: parms.summonly,
    };
    let uri = build_cache_uri(cache_token, &options)?;
    client.get_parsed(&uri, &[], parms.options).await
}
