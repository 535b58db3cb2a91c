//! URIMap definitions and installed URIMaps
//!
//! A URIMap definition has one of three usages. Server URIMaps route to a
//! program, pipeline URIMaps to a pipeline, client URIMaps describe an
//! outbound endpoint. Enabling an installed URIMap is an attribute update
//! rather than an action.

use crate::common::{
    keyed_uri, require, scope, CSD_GROUP, PIPELINE_NAME, PROGRAM_NAME, REGION_NAME,
    URIMAP_HOST, URIMAP_NAME, URIMAP_PATH, URIMAP_SCHEME,
};
use crate::types::UrimapParms;
use cmci_client::constants::resource::{DEFINITION_URIMAP, URIMAP};
use cmci_client::expect::one_of;
use cmci_client::{
    build_resource_uri, Attributes, CmciResponse, CmciRestClient, CmciResult, Payload,
    RequestEnvelope,
};
use tracing::debug;

const SCHEMES: &[&str] = &["http", "https"];
const AUTHENTICATE: &[&str] = &["NO", "BASIC"];
const AUTHENTICATE_LABEL: &str = "CICS URIMap Authenticate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Usage {
    Server,
    Client,
    Pipeline,
}

impl Usage {
    fn as_str(&self) -> &'static str {
        match self {
            Usage::Server => "server",
            Usage::Client => "client",
            Usage::Pipeline => "pipeline",
        }
    }
}

pub async fn define_urimap_server(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    define_urimap(client, parms, Usage::Server).await
}

pub async fn define_urimap_client(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    define_urimap(client, parms, Usage::Client).await
}

pub async fn define_urimap_pipeline(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    define_urimap(client, parms, Usage::Pipeline).await
}

async fn define_urimap(client: &CmciRestClient, parms: &UrimapParms, usage: Usage) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &URIMAP_NAME)?;
    let path = require(&parms.path, &URIMAP_PATH)?;
    let host = require(&parms.host, &URIMAP_HOST)?;
    let scheme = one_of(require(&parms.scheme, &URIMAP_SCHEME)?, SCHEMES, URIMAP_SCHEME.label)?;

    let target = match usage {
        Usage::Server => Some(("program", require(&parms.program_name, &PROGRAM_NAME)?)),
        Usage::Pipeline => Some(("pipeline", require(&parms.pipeline_name, &PIPELINE_NAME)?)),
        Usage::Client => None,
    };
    let authenticate = match (usage, parms.authenticate.as_deref()) {
        (Usage::Client, Some(value)) => Some(one_of(value, AUTHENTICATE, AUTHENTICATE_LABEL)?),
        _ => None,
    };

    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!(
        "Attempting to define a {} URIMap with the following parameters:\n{:?}",
        usage.as_str(),
        parms
    );

    let status = if parms.enable.unwrap_or(true) { "ENABLED" } else { "DISABLED" };
    let mut attributes = Attributes::new()
        .set("name", name)
        .set("csdgroup", csd_group)
        .set("path", path)
        .set("host", host)
        .set("scheme", scheme)
        .set("usage", usage.as_str());
    if let Some((key, value)) = target {
        attributes = attributes.set(key, value);
    }

    attributes = match usage {
        Usage::Client => attributes
            .set_opt("authenticate", authenticate)
            .set_opt("certificate", parms.certificate.as_deref()),
        Usage::Server | Usage::Pipeline => attributes
            .set_opt("transaction", parms.transaction_name.as_deref())
            .set_opt("webservice", parms.webservice_name.as_deref()),
    };
    let attributes = attributes
        .set_opt("description", parms.description.as_deref())
        .set("status", status);

    let uri = build_resource_uri(DEFINITION_URIMAP, &scope(region_name, &parms.cics_plex))?;
    let payload = Payload::from(RequestEnvelope::create_in_csd(attributes));
    client.post_parsed(&uri, &[], Some(&payload), None).await
}

pub async fn delete_urimap(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &URIMAP_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to delete a URIMap with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(DEFINITION_URIMAP, "NAME", name, Some(csd_group), region_name, &parms.cics_plex)?;
    client.delete_parsed(&uri, &[], None).await
}

pub async fn install_urimap(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &URIMAP_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to install a URIMap with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(DEFINITION_URIMAP, "NAME", name, Some(csd_group), region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::action("CSDINSTALL"));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}

pub async fn discard_urimap(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &URIMAP_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to discard a URIMap with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(URIMAP, "NAME", name, None, region_name, &parms.cics_plex)?;
    client.delete_parsed(&uri, &[], None).await
}

pub async fn enable_urimap(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    set_urimap_status(client, parms, "ENABLED").await
}

pub async fn disable_urimap(client: &CmciRestClient, parms: &UrimapParms) -> CmciResult<CmciResponse> {
    set_urimap_status(client, parms, "DISABLED").await
}

async fn set_urimap_status(
    client: &CmciRestClient,
    parms: &UrimapParms,
    status: &str,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &URIMAP_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to set a URIMap {} with the following parameters:\n{:?}", status, parms);

    let uri = keyed_uri(URIMAP, "NAME", name, None, region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::update(
        Attributes::new().set("ENABLESTATUS", status),
    ));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}
