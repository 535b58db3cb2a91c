//! Program definitions and installed programs

use crate::common::{keyed_uri, require, scope, CSD_GROUP, PROGRAM_NAME, REGION_NAME};
use crate::types::ProgramParms;
use cmci_client::constants::resource::{DEFINITION_PROGRAM, PROGRAM};
use cmci_client::{
    build_resource_uri, Attributes, CmciResponse, CmciRestClient, CmciResult, Payload,
    RequestEnvelope,
};
use tracing::debug;

/// Define a program in a CSD group
pub async fn define_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &PROGRAM_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to define a program with the following parameters:\n{:?}", parms);

    let uri = build_resource_uri(DEFINITION_PROGRAM, &scope(region_name, &parms.cics_plex))?;
    let payload = Payload::from(RequestEnvelope::create_in_csd(
        Attributes::new().set("name", name).set("csdgroup", csd_group),
    ));
    client.post_parsed(&uri, &[], Some(&payload), None).await
}

/// Delete a program definition from its CSD group
pub async fn delete_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &PROGRAM_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to delete a program with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(DEFINITION_PROGRAM, "NAME", name, Some(csd_group), region_name, &parms.cics_plex)?;
    client.delete_parsed(&uri, &[], None).await
}

/// Install a program definition into a region
pub async fn install_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &PROGRAM_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to install a program with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(DEFINITION_PROGRAM, "NAME", name, Some(csd_group), region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::action("CSDINSTALL"));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}

/// Discard an installed program from a region
pub async fn discard_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &PROGRAM_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to discard a program with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(PROGRAM, "PROGRAM", name, None, region_name, &parms.cics_plex)?;
    client.delete_parsed(&uri, &[], None).await
}

/// Load a new copy of an installed program
pub async fn program_newcopy(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    program_action(client, parms, "NEWCOPY").await
}

/// Phase in a new copy of an installed program
pub async fn program_phasein(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    program_action(client, parms, "PHASEIN").await
}

pub async fn enable_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    program_action(client, parms, "ENABLE").await
}

pub async fn disable_program(client: &CmciRestClient, parms: &ProgramParms) -> CmciResult<CmciResponse> {
    program_action(client, parms, "DISABLE").await
}

async fn program_action(
    client: &CmciRestClient,
    parms: &ProgramParms,
    action: &str,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &PROGRAM_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting {} of a program with the following parameters:\n{:?}", action, parms);

    let uri = keyed_uri(PROGRAM, "PROGRAM", name, None, region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::action(action));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}
