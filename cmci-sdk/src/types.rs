//! Parameter objects for resource operations
//!
//! Every field is optional so that a parameter that was never supplied can
//! be told apart from one supplied blank.

use cmci_client::{QueryFlags, RequestOptions};
use cmci_config::ConnectionConfig;
use serde::{Deserialize, Serialize};

/// Region and CICSplex an operation is addressed to
pub trait Scoped: Sized {
    fn scope_mut(&mut self) -> (&mut Option<String>, &mut Option<String>);

    /// Fill a missing region or CICSplex from the connection defaults
    fn with_default_scope(mut self, connection: &ConnectionConfig) -> Self {
        let (region_name, cics_plex) = self.scope_mut();
        if region_name.is_none() {
            *region_name = connection.region_name.clone();
        }
        if cics_plex.is_none() {
            *cics_plex = connection.cics_plex.clone();
        }
        self
    }
}

macro_rules! impl_scoped {
    ($($parms:ty),+ $(,)?) => {
        $(
            impl Scoped for $parms {
                fn scope_mut(&mut self) -> (&mut Option<String>, &mut Option<String>) {
                    (&mut self.region_name, &mut self.cics_plex)
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgramParms {
    pub name: Option<String>,
    pub csd_group: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionParms {
    pub name: Option<String>,
    pub program_name: Option<String>,
    pub csd_group: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

/// URIMap definition and addressing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrimapParms {
    pub name: Option<String>,
    pub csd_group: Option<String>,
    pub path: Option<String>,
    pub host: Option<String>,
    /// `http` or `https`
    pub scheme: Option<String>,
    /// Target program of a server URIMap
    pub program_name: Option<String>,
    /// Pipeline of a pipeline URIMap
    pub pipeline_name: Option<String>,
    pub transaction_name: Option<String>,
    pub webservice_name: Option<String>,
    pub description: Option<String>,
    /// `NO` or `BASIC`, client URIMaps only
    pub authenticate: Option<String>,
    /// Certificate label, client URIMaps only
    pub certificate: Option<String>,
    /// Install enabled; defaults to enabled
    pub enable: Option<bool>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebServiceParms {
    pub name: Option<String>,
    pub csd_group: Option<String>,
    pub pipeline_name: Option<String>,
    /// Web service binding file on zFS
    pub ws_bind: Option<String>,
    /// Validate SOAP messages against the WSDL
    pub validation: bool,
    pub description: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalFileParms {
    pub name: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsdGroupParms {
    /// CSD group name
    pub name: Option<String>,
    pub csd_list: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
}

/// Any resource table with free-form criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceParms {
    /// Resource table name, e.g. `CICSProgram`
    pub name: Option<String>,
    pub region_name: Option<String>,
    pub cics_plex: Option<String>,
    pub criteria: Option<String>,
    pub parameter: Option<String>,
    #[serde(skip)]
    pub query_flags: QueryFlags,
    #[serde(skip)]
    pub options: Option<RequestOptions>,
}

/// Page of a result cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheParms {
    pub cache_token: Option<String>,
    pub start_index: Option<u64>,
    pub count: Option<u64>,
    pub nodiscard: Option<bool>,
    pub summonly: bool,
    #[serde(skip)]
    pub options: Option<RequestOptions>,
}

impl_scoped!(
    ProgramParms,
    TransactionParms,
    UrimapParms,
    WebServiceParms,
    LocalFileParms,
    CsdGroupParms,
    ResourceParms,
);
