//! Web service definitions

use crate::common::{
    keyed_uri, require, scope, CSD_GROUP, PIPELINE_NAME, REGION_NAME, WEBSERVICE_BINDING,
    WEBSERVICE_NAME,
};
use crate::types::WebServiceParms;
use cmci_client::constants::resource::DEFINITION_WEBSERVICE;
use cmci_client::{
    build_resource_uri, Attributes, CmciResponse, CmciRestClient, CmciResult, Payload,
    RequestEnvelope,
};
use tracing::debug;

/// Define a web service bound to a pipeline and a WSBind file
pub async fn define_webservice(client: &CmciRestClient, parms: &WebServiceParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &WEBSERVICE_NAME)?;
    let pipeline_name = require(&parms.pipeline_name, &PIPELINE_NAME)?;
    let ws_bind = require(&parms.ws_bind, &WEBSERVICE_BINDING)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to define a web service with the following parameters:\n{:?}", parms);

    let attributes = Attributes::new()
        .set("name", name)
        .set("csdgroup", csd_group)
        .set("pipeline", pipeline_name)
        .set("wsbind", ws_bind)
        .set("validation", if parms.validation { "yes" } else { "no" })
        .set_opt("description", parms.description.as_deref());

    let uri = build_resource_uri(DEFINITION_WEBSERVICE, &scope(region_name, &parms.cics_plex))?;
    let payload = Payload::from(RequestEnvelope::create_in_csd(attributes));
    client.post_parsed(&uri, &[], Some(&payload), None).await
}

pub async fn delete_webservice(client: &CmciRestClient, parms: &WebServiceParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &WEBSERVICE_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to delete a web service with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(
        DEFINITION_WEBSERVICE,
        "NAME",
        name,
        Some(csd_group),
        region_name,
        &parms.cics_plex,
    )?;
    client.delete_parsed(&uri, &[], None).await
}

pub async fn install_webservice(client: &CmciRestClient, parms: &WebServiceParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &WEBSERVICE_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to install a web service with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(
        DEFINITION_WEBSERVICE,
        "NAME",
        name,
        Some(csd_group),
        region_name,
        &parms.cics_plex,
    )?;
    let payload = Payload::from(RequestEnvelope::action("CSDINSTALL"));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}
