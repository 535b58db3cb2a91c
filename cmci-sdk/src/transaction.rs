//! Transaction definitions and installed transactions

use crate::common::{
    keyed_uri, require, scope, CSD_GROUP, PROGRAM_NAME, REGION_NAME, TRANSACTION_NAME,
};
use crate::types::TransactionParms;
use cmci_client::constants::resource::{DEFINITION_TRANSACTION, LOCAL_TRANSACTION};
use cmci_client::{
    build_resource_uri, Attributes, CmciResponse, CmciRestClient, CmciResult, Payload,
    RequestEnvelope,
};
use tracing::debug;

/// Define a transaction running `program_name` in a CSD group
pub async fn define_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &TRANSACTION_NAME)?;
    let program_name = require(&parms.program_name, &PROGRAM_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to define a transaction with the following parameters:\n{:?}", parms);

    let uri = build_resource_uri(DEFINITION_TRANSACTION, &scope(region_name, &parms.cics_plex))?;
    let payload = Payload::from(RequestEnvelope::create_in_csd(
        Attributes::new()
            .set("name", name)
            .set("program", program_name)
            .set("csdgroup", csd_group),
    ));
    client.post_parsed(&uri, &[], Some(&payload), None).await
}

pub async fn delete_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &TRANSACTION_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to delete a transaction with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(
        DEFINITION_TRANSACTION,
        "NAME",
        name,
        Some(csd_group),
        region_name,
        &parms.cics_plex,
    )?;
    client.delete_parsed(&uri, &[], None).await
}

pub async fn install_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &TRANSACTION_NAME)?;
    let csd_group = require(&parms.csd_group, &CSD_GROUP)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to install a transaction with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(
        DEFINITION_TRANSACTION,
        "NAME",
        name,
        Some(csd_group),
        region_name,
        &parms.cics_plex,
    )?;
    let payload = Payload::from(RequestEnvelope::action("CSDINSTALL"));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}

/// Discard an installed transaction from a region
pub async fn discard_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &TRANSACTION_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting to discard a transaction with the following parameters:\n{:?}", parms);

    let uri = keyed_uri(LOCAL_TRANSACTION, "TRANID", name, None, region_name, &parms.cics_plex)?;
    client.delete_parsed(&uri, &[], None).await
}

pub async fn enable_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    transaction_action(client, parms, "ENABLE").await
}

pub async fn disable_transaction(
    client: &CmciRestClient,
    parms: &TransactionParms,
) -> CmciResult<CmciResponse> {
    transaction_action(client, parms, "DISABLE").await
}

async fn transaction_action(
    client: &CmciRestClient,
    parms: &TransactionParms,
    action: &str,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &TRANSACTION_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting {} of a transaction with the following parameters:\n{:?}", action, parms);

    let uri = keyed_uri(LOCAL_TRANSACTION, "TRANID", name, None, region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::action(action));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}
