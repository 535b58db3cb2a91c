//! CMCI protocol constants

use std::fmt;

/// Leading path segment of every CMCI URI
pub const CICS_SYSTEM_MANAGEMENT: &str = "CICSSystemManagement";

/// Resource table addressed when paging through a result cache
pub const CICS_RESULT_CACHE: &str = "CICSResultCache";

/// CMCI resource table names
pub mod resource {
    pub const PROGRAM: &str = "CICSProgram";
    pub const LOCAL_TRANSACTION: &str = "CICSLocalTransaction";
    pub const REMOTE_TRANSACTION: &str = "CICSRemoteTransaction";
    pub const LOCAL_FILE: &str = "CICSLocalFile";
    pub const URIMAP: &str = "CICSURIMap";
    pub const WEBSERVICE: &str = "CICSWebService";
    pub const CSD_GROUP: &str = "CICSCSDGroup";
    pub const CSD_GROUP_IN_LIST: &str = "CICSCSDGroupInList";
    pub const REGION: &str = "CICSRegion";
    pub const MANAGED_REGION: &str = "CICSManagedRegion";
    pub const CICSPLEX: &str = "CICSCICSPlex";

    pub const DEFINITION_PROGRAM: &str = "CICSDefinitionProgram";
    pub const DEFINITION_TRANSACTION: &str = "CICSDefinitionTransaction";
    pub const DEFINITION_URIMAP: &str = "CICSDefinitionURIMap";
    pub const DEFINITION_WEBSERVICE: &str = "CICSDefinitionWebService";
}

/// CMCI `api_response1` codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmciResponseCode {
    Ok,
    NoData,
    InvalidParm,
    NotAvailable,
    InvalidData,
}

impl CmciResponseCode {
    pub fn code(&self) -> u32 {
        match self {
            CmciResponseCode::Ok => 1024,
            CmciResponseCode::NoData => 1027,
            CmciResponseCode::InvalidParm => 1028,
            CmciResponseCode::NotAvailable => 1034,
            CmciResponseCode::InvalidData => 1041,
        }
    }

    /// Name CMCI reports in `api_response1_alt`
    pub fn name(&self) -> &'static str {
        match self {
            CmciResponseCode::Ok => "OK",
            CmciResponseCode::NoData => "NODATA",
            CmciResponseCode::InvalidParm => "INVALIDPARM",
            CmciResponseCode::NotAvailable => "NOTAVAILABLE",
            CmciResponseCode::InvalidData => "INVALIDDATA",
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1024 => Some(CmciResponseCode::Ok),
            1027 => Some(CmciResponseCode::NoData),
            1028 => Some(CmciResponseCode::InvalidParm),
            1034 => Some(CmciResponseCode::NotAvailable),
            1041 => Some(CmciResponseCode::InvalidData),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OK" => Some(CmciResponseCode::Ok),
            "NODATA" => Some(CmciResponseCode::NoData),
            "INVALIDPARM" => Some(CmciResponseCode::InvalidParm),
            "NOTAVAILABLE" => Some(CmciResponseCode::NotAvailable),
            "INVALIDDATA" => Some(CmciResponseCode::InvalidData),
            _ => None,
        }
    }
}

impl fmt::Display for CmciResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_codes_are_fixed() {
        assert_eq!(CmciResponseCode::Ok.code(), 1024);
        assert_eq!(CmciResponseCode::NoData.code(), 1027);
        assert_eq!(CmciResponseCode::InvalidParm.code(), 1028);
        assert_eq!(CmciResponseCode::NotAvailable.code(), 1034);
        assert_eq!(CmciResponseCode::InvalidData.code(), 1041);
    }

    #[test]
    fn test_code_and_name_lookup_agree() {
        for code in [
            CmciResponseCode::Ok,
            CmciResponseCode::NoData,
            CmciResponseCode::InvalidParm,
            CmciResponseCode::NotAvailable,
            CmciResponseCode::InvalidData,
        ] {
            assert_eq!(CmciResponseCode::from_code(code.code()), Some(code));
            assert_eq!(CmciResponseCode::from_name(code.name()), Some(code));
        }
        assert_eq!(CmciResponseCode::from_code(1025), None);
        assert_eq!(CmciResponseCode::InvalidParm.to_string(), "1028 (INVALIDPARM)");
    }
}
