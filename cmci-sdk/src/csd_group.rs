//! CSD group membership of CSD lists

use crate::common::{require, scope, CSD_GROUP, CSD_LIST, REGION_NAME};
use crate::types::CsdGroupParms;
use cmci_client::constants::resource::{CSD_GROUP as CSD_GROUP_TABLE, CSD_GROUP_IN_LIST};
use cmci_client::{
    build_resource_uri, CmciResponse, CmciRestClient, CmciResult, Parameter, Payload,
    RequestEnvelope,
};
use tracing::debug;

/// Add a CSD group to a CSD list
pub async fn add_csd_group_to_list(client: &CmciRestClient, parms: &CsdGroupParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &CSD_GROUP)?;
    let csd_list = require(&parms.csd_list, &CSD_LIST)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to add a CSD group to a list with the following parameters:\n{:?}", parms);

    let context = scope(region_name, &parms.cics_plex).with_criteria(format!("GROUP={}", name));
    let uri = build_resource_uri(CSD_GROUP_TABLE, &context)?;
    let payload = Payload::from(RequestEnvelope::action_with(
        "ADDTOLIST",
        vec![Parameter::with_value("TO_CSDLIST", csd_list)],
    ));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}

/// Remove a CSD group from a CSD list
pub async fn remove_csd_group_from_list(
    client: &CmciRestClient,
    parms: &CsdGroupParms,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &CSD_GROUP)?;
    let csd_list = require(&parms.csd_list, &CSD_LIST)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to remove a CSD group from a list with the following parameters:\n{:?}", parms);

    let context = scope(region_name, &parms.cics_plex)
        .with_criteria(format!("CSDLIST=='{}' AND GROUP=='{}'", csd_list, name));
    let uri = build_resource_uri(CSD_GROUP_IN_LIST, &context)?;
    client.delete_parsed(&uri, &[], None).await
}
