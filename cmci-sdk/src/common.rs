//! Shared checks and URI pieces for resource operations

use cmci_client::expect::defined_and_non_blank;
use cmci_client::{build_resource_uri, ResourceContext, ValidationError};

/// Parameter label and its "is required" message
pub(crate) struct Required {
    pub label: &'static str,
    pub message: &'static str,
}

pub(crate) const PROGRAM_NAME: Required = Required {
    label: "CICS Program name",
    message: "CICS program name is required",
};
pub(crate) const TRANSACTION_NAME: Required = Required {
    label: "CICS Transaction name",
    message: "CICS transaction name is required",
};
pub(crate) const URIMAP_NAME: Required = Required {
    label: "CICS URIMap name",
    message: "CICS URIMap name is required",
};
pub(crate) const URIMAP_PATH: Required = Required {
    label: "CICS URIMap Path",
    message: "CICS URIMap path is required",
};
pub(crate) const URIMAP_HOST: Required = Required {
    label: "CICS URIMap Host",
    message: "CICS URIMap host is required",
};
pub(crate) const URIMAP_SCHEME: Required = Required {
    label: "CICS URIMap Scheme",
    message: "CICS URIMap scheme is required",
};
pub(crate) const WEBSERVICE_NAME: Required = Required {
    label: "CICS Web service name",
    message: "CICS web service name is required",
};
pub(crate) const PIPELINE_NAME: Required = Required {
    label: "CICS Pipeline name",
    message: "CICS pipeline name is required",
};
pub(crate) const WEBSERVICE_BINDING: Required = Required {
    label: "CICS Web service binding file",
    message: "CICS web service binding file is required",
};
pub(crate) const LOCAL_FILE_NAME: Required = Required {
    label: "CICS Local file name",
    message: "CICS local file name is required",
};
pub(crate) const CSD_GROUP: Required = Required {
    label: "CICS CSD Group",
    message: "CICS CSD group name is required",
};
pub(crate) const CSD_LIST: Required = Required {
    label: "CICS CSD List",
    message: "CICS CSD list name is required",
};
pub(crate) const REGION_NAME: Required = Required {
    label: "CICS Region name",
    message: "CICS region name is required",
};
pub(crate) const RESOURCE_NAME: Required = Required {
    label: "CICS Resource name",
    message: "CICS resource name is required",
};
pub(crate) const CACHE_TOKEN: Required = Required {
    label: "CICS Result Cache Token",
    message: "CICS result cache token is required",
};

pub(crate) fn require<'a>(value: &'a Option<String>, required: &Required) -> Result<&'a str, ValidationError> {
    defined_and_non_blank(value.as_deref(), required.label, required.message)
}

/// `/CICSSystemManagement/<table>/<plex>/<region>?CRITERIA=(<key>=<name>)[&PARAMETER=CSDGROUP(<group>)]`
pub(crate) fn keyed_uri(
    table: &str,
    key: &str,
    name: &str,
    csd_group: Option<&str>,
    region_name: &str,
    cics_plex: &Option<String>,
) -> Result<String, ValidationError> {
    let mut context = scope(region_name, cics_plex).with_criteria(format!("{}={}", key, name));
    if let Some(group) = csd_group {
        context = context.with_parameter(format!("CSDGROUP({})", group));
    }
    build_resource_uri(table, &context)
}

/// Context addressing a region, optionally inside a CICSplex
pub(crate) fn scope(region_name: &str, cics_plex: &Option<String>) -> ResourceContext {
    let context = ResourceContext::new().with_region(region_name);
    match cics_plex {
        Some(plex) => context.with_cics_plex(plex.as_str()),
        None => context,
    }
}
