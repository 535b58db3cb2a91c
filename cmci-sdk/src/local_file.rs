//! Installed local files

use crate::common::{keyed_uri, require, LOCAL_FILE_NAME, REGION_NAME};
use crate::types::LocalFileParms;
use cmci_client::constants::resource::LOCAL_FILE;
use cmci_client::{CmciResponse, CmciRestClient, CmciResult, Payload, RequestEnvelope};
use tracing::debug;

pub async fn enable_local_file(client: &CmciRestClient, parms: &LocalFileParms) -> CmciResult<CmciResponse> {
    local_file_action(client, parms, "ENABLE").await
}

pub async fn disable_local_file(client: &CmciRestClient, parms: &LocalFileParms) -> CmciResult<CmciResponse> {
    local_file_action(client, parms, "DISABLE").await
}

pub async fn open_local_file(client: &CmciRestClient, parms: &LocalFileParms) -> CmciResult<CmciResponse> {
    local_file_action(client, parms, "OPEN").await
}

pub async fn close_local_file(client: &CmciRestClient, parms: &LocalFileParms) -> CmciResult<CmciResponse> {
    local_file_action(client, parms, "CLOSE").await
}

async fn local_file_action(
    client: &CmciRestClient,
    parms: &LocalFileParms,
    action: &str,
) -> CmciResult<CmciResponse> {
    let name = require(&parms.name, &LOCAL_FILE_NAME)?;
    let region_name = require(&parms.region_name, &REGION_NAME)?;

    debug!("Attempting {} of a local file with the following parameters:\n{:?}", action, parms);

    let uri = keyed_uri(LOCAL_FILE, "FILE", name, None, region_name, &parms.cics_plex)?;
    let payload = Payload::from(RequestEnvelope::action(action));
    client.put_parsed(&uri, &[], Some(&payload), None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{expect_request, unreachable_client};
    use cmci_client::HttpMethod;

    fn parms() -> LocalFileParms {
        LocalFileParms {
            name: Some("FILEA".to_string()),
            region_name: Some("REGION1".to_string()),
            cics_plex: Some("PLEX1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_actions_address_file_key() {
        let uri = "/CICSSystemManagement/CICSLocalFile/PLEX1/REGION1?CRITERIA=(FILE%3DFILEA)";
        let body = |action: &str| format!(r#"<request><action name="{}"/></request>"#, action);

        let client = expect_request(HttpMethod::Put, uri, Some(&body("ENABLE")));
        enable_local_file(&client, &parms()).await.unwrap();

        let client = expect_request(HttpMethod::Put, uri, Some(&body("DISABLE")));
        disable_local_file(&client, &parms()).await.unwrap();

        let client = expect_request(HttpMethod::Put, uri, Some(&body("OPEN")));
        open_local_file(&client, &parms()).await.unwrap();

        let client = expect_request(HttpMethod::Put, uri, Some(&body("CLOSE")));
        close_local_file(&client, &parms()).await.unwrap();
    }

    #[tokio::test]
    async fn test_two_tier_validation() {
        let client = unreachable_client();

        let missing = LocalFileParms {
            name: None,
            ..parms()
        };
        assert_eq!(
            enable_local_file(&client, &missing).await.unwrap_err().to_string(),
            "CICS local file name is required"
        );

        let blank = LocalFileParms {
            name: Some(String::new()),
            ..parms()
        };
        assert_eq!(
            close_local_file(&client, &blank).await.unwrap_err().to_string(),
            "Required parameter 'CICS Local file name' must not be blank"
        );
    }
}
