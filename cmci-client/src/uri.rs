//! Resource and result-cache URI construction
//!
//! Both builders are pure string transforms. Criteria and parameter values
//! are percent-encoded with the same reserved set as ECMAScript's
//! `encodeURIComponent`, which is what CMCI servers and recorded fixtures
//! expect; flag tokens are bare words joined with `&`.

use crate::constants::{CICS_RESULT_CACHE, CICS_SYSTEM_MANAGEMENT};
use crate::expect::{defined_and_non_blank, ValidationError};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Bare query tokens appended after criteria and parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFlags {
    /// Return only the result summary, no records
    pub summonly: bool,
    /// Keep the result cache after this request
    pub nodiscard: bool,
    /// Let the request exceed the server's record-count warning threshold
    pub override_warning_count: bool,
}

/// Addressing context for one CMCI call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceContext {
    /// `None` omits the CICSplex segment; `Some("")` still inserts its separator
    pub cics_plex: Option<String>,
    pub region_name: Option<String>,
    pub criteria: Option<String>,
    pub parameter: Option<String>,
    pub query_flags: QueryFlags,
}

impl ResourceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cics_plex(mut self, cics_plex: impl Into<String>) -> Self {
        self.cics_plex = Some(cics_plex.into());
        self
    }

    pub fn with_region(mut self, region_name: impl Into<String>) -> Self {
        self.region_name = Some(region_name.into());
        self
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = Some(criteria.into());
        self
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_query_flags(mut self, query_flags: QueryFlags) -> Self {
        self.query_flags = query_flags;
        self
    }
}

/// Paging options for a result cache request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// 1-based index of the first record to return
    pub start_index: Option<u64>,
    /// Number of records to return; only used together with `start_index`
    pub count: Option<u64>,
    /// `None` and `Some(true)` keep the cache; `Some(false)` releases it
    pub nodiscard: Option<bool>,
    pub summonly: bool,
}

/// Percent-encode a single URI component
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Build `/CICSSystemManagement/<resource>/<plex>/<region>?<query>`
pub fn build_resource_uri<'a>(
    resource_name: impl Into<Option<&'a str>>,
    context: &ResourceContext,
) -> Result<String, ValidationError> {
    let resource_name = defined_and_non_blank(
        resource_name.into(),
        "CICS Resource name",
        "CICS resource name is required",
    )?;

    let cics_plex = context
        .cics_plex
        .as_deref()
        .map(|plex| format!("{}/", plex))
        .unwrap_or_default();
    let region = context.region_name.as_deref().unwrap_or_default();

    let mut uri = format!(
        "/{}/{}/{}{}",
        CICS_SYSTEM_MANAGEMENT, resource_name, cics_plex, region
    );
    let mut delimiter = '?';

    if let Some(criteria) = context.criteria.as_deref().filter(|c| !c.is_empty()) {
        let encoded = encode_uri_component(criteria);
        uri.push(delimiter);
        uri.push_str("CRITERIA=");
        if criteria.starts_with('(') {
            uri.push_str(&encoded);
        } else {
            uri.push('(');
            uri.push_str(&encoded);
            uri.push(')');
        }
        delimiter = '&';
    }

    if let Some(parameter) = context.parameter.as_deref().filter(|p| !p.is_empty()) {
        uri.push(delimiter);
        uri.push_str("PARAMETER=");
        uri.push_str(&encode_uri_component(parameter));
        delimiter = '&';
    }

    let flags = [
        (context.query_flags.summonly, "SUMMONLY"),
        (context.query_flags.nodiscard, "NODISCARD"),
        (context.query_flags.override_warning_count, "OVERRIDEWARNINGCOUNT"),
    ];
    for (_, token) in flags.iter().filter(|(set, _)| *set) {
        uri.push(delimiter);
        uri.push_str(token);
        delimiter = '&';
    }

    Ok(uri)
}

/// Build `/CICSSystemManagement/CICSResultCache/<token>[/<start>[/<count>]]`
pub fn build_cache_uri<'a>(
    cache_token: impl Into<Option<&'a str>>,
    options: &CacheOptions,
) -> Result<String, ValidationError> {
    let cache_token = defined_and_non_blank(
        cache_token.into(),
        "CICS Result Cache Token",
        "CICS result cache token is required",
    )?;

    let mut uri = format!(
        "/{}/{}/{}",
        CICS_SYSTEM_MANAGEMENT, CICS_RESULT_CACHE, cache_token
    );

    if let Some(start_index) = options.start_index {
        uri.push_str(&format!("/{}", start_index));
        if let Some(count) = options.count {
            uri.push_str(&format!("/{}", count));
        }
    }

    let mut delimiter = '?';
    if options.nodiscard.unwrap_or(true) {
        uri.push(delimiter);
        uri.push_str("NODISCARD");
        delimiter = '&';
    }

    if options.summonly {
        uri.push(delimiter);
        uri.push_str("SUMMONLY");
    }

    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    #[test]
    fn test_plex_region_and_criteria() {
        let context = ResourceContext::new()
            .with_cics_plex("PLEX01")
            .with_region("REGION1")
            .with_criteria("program=D*");
        assert_eq!(
            build_resource_uri("CICSProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSProgram/PLEX01/REGION1?CRITERIA=(program%3DD*)"
        );
    }

    #[test]
    fn test_without_plex_or_region() {
        assert_eq!(
            build_resource_uri("resource1", &ResourceContext::new()).unwrap(),
            "/CICSSystemManagement/resource1/"
        );
    }

    #[test]
    fn test_empty_plex_still_inserts_separator() {
        let context = ResourceContext::new().with_cics_plex("").with_region("");
        assert_eq!(
            build_resource_uri("resource1", &context).unwrap(),
            "/CICSSystemManagement/resource1//"
        );
    }

    #[test]
    fn test_region_only() {
        let context = ResourceContext::new().with_region("REGION1");
        assert_eq!(
            build_resource_uri("CICSRegion", &context).unwrap(),
            "/CICSSystemManagement/CICSRegion/REGION1"
        );
    }

    #[test]
    fn test_missing_and_blank_resource_name() {
        let missing = build_resource_uri(None::<&str>, &ResourceContext::new()).unwrap_err();
        assert_eq!(missing.to_string(), "CICS resource name is required");

        let blank = build_resource_uri("", &ResourceContext::new()).unwrap_err();
        assert_eq!(
            blank.to_string(),
            "Required parameter 'CICS Resource name' must not be blank"
        );
    }

    #[test]
    fn test_criteria_already_parenthesised_is_not_wrapped() {
        let context = ResourceContext::new()
            .with_region("R1")
            .with_criteria("(NAME=A*) OR (NAME=B*)");
        assert_eq!(
            build_resource_uri("CICSURIMap", &context).unwrap(),
            "/CICSSystemManagement/CICSURIMap/R1?CRITERIA=(NAME%3DA*)%20OR%20(NAME%3DB*)"
        );
    }

    #[test]
    fn test_criteria_and_parameter_are_joined() {
        let context = ResourceContext::new()
            .with_region("R1")
            .with_criteria("NAME=PGM1")
            .with_parameter("CSDGROUP(GRP1)");
        assert_eq!(
            build_resource_uri("CICSDefinitionProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSDefinitionProgram/R1?CRITERIA=(NAME%3DPGM1)&PARAMETER=CSDGROUP(GRP1)"
        );
    }

    #[test]
    fn test_parameter_alone_uses_question_mark() {
        let context = ResourceContext::new().with_region("R1").with_parameter("CSDGROUP(*)");
        assert_eq!(
            build_resource_uri("CICSDefinitionProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSDefinitionProgram/R1?PARAMETER=CSDGROUP(*)"
        );
    }

    #[test]
    fn test_empty_criteria_and_parameter_are_skipped() {
        let context = ResourceContext::new()
            .with_region("R1")
            .with_criteria("")
            .with_parameter("");
        assert_eq!(
            build_resource_uri("CICSProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSProgram/R1"
        );
    }

    #[test]
    fn test_flags_keep_fixed_order() {
        let flags = QueryFlags {
            summonly: true,
            nodiscard: true,
            override_warning_count: true,
        };
        let context = ResourceContext::new().with_region("R1").with_query_flags(flags);
        assert_eq!(
            build_resource_uri("CICSProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSProgram/R1?SUMMONLY&NODISCARD&OVERRIDEWARNINGCOUNT"
        );

        let context = context
            .with_criteria("PROGRAM=A")
            .with_query_flags(QueryFlags {
                nodiscard: true,
                ..Default::default()
            });
        assert_eq!(
            build_resource_uri("CICSProgram", &context).unwrap(),
            "/CICSSystemManagement/CICSProgram/R1?CRITERIA=(PROGRAM%3DA)&NODISCARD"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let context = ResourceContext::new()
            .with_cics_plex("P")
            .with_region("R")
            .with_criteria("A=B & C")
            .with_parameter("X Y");
        let first = build_resource_uri("CICSProgram", &context).unwrap();
        let second = build_resource_uri("CICSProgram", &context.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_criteria_decodes_back_to_original() {
        for criteria in ["NAME=A&B", "PROGRAM=X?Y#Z", "TRANID=ä/€ %", "(NAME='a b')"] {
            let context = ResourceContext::new().with_region("R").with_criteria(criteria);
            let uri = build_resource_uri("CICSProgram", &context).unwrap();
            let encoded = uri.split_once("CRITERIA=").unwrap().1;
            let decoded = percent_decode_str(encoded).decode_utf8().unwrap();

            let expected = if criteria.starts_with('(') {
                criteria.to_string()
            } else {
                format!("({})", criteria)
            };
            assert_eq!(decoded, expected);
            assert!(!encoded.contains('&'));
            assert!(!encoded.contains('?'));
        }
    }

    #[test]
    fn test_encode_uri_component_reserved_set() {
        assert_eq!(encode_uri_component("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
        assert_eq!(encode_uri_component("a b=c&d/e"), "a%20b%3Dc%26d%2Fe");
    }

    #[test]
    fn test_cache_uri_defaults_to_nodiscard() {
        assert_eq!(
            build_cache_uri("ABC123", &CacheOptions::default()).unwrap(),
            "/CICSSystemManagement/CICSResultCache/ABC123?NODISCARD"
        );
    }

    #[test]
    fn test_cache_uri_explicit_discard() {
        let options = CacheOptions {
            nodiscard: Some(false),
            ..Default::default()
        };
        assert_eq!(
            build_cache_uri("ABC123", &options).unwrap(),
            "/CICSSystemManagement/CICSResultCache/ABC123"
        );
    }

    #[test]
    fn test_cache_uri_paging() {
        let options = CacheOptions {
            start_index: Some(15),
            count: Some(5),
            ..Default::default()
        };
        assert_eq!(
            build_cache_uri("ABC123", &options).unwrap(),
            "/CICSSystemManagement/CICSResultCache/ABC123/15/5?NODISCARD"
        );
    }

    #[test]
    fn test_cache_uri_count_requires_start_index() {
        let options = CacheOptions {
            count: Some(5),
            ..Default::default()
        };
        assert_eq!(
            build_cache_uri("ABC123", &options).unwrap(),
            "/CICSSystemManagement/CICSResultCache/ABC123?NODISCARD"
        );
    }

    #[test]
    fn test_cache_uri_summonly() {
        let keep = CacheOptions {
            summonly: true,
            ..Default::default()
        };
        assert_eq!(
            build_cache_uri("T", &keep).unwrap(),
            "/CICSSystemManagement/CICSResultCache/T?NODISCARD&SUMMONLY"
        );

        let release = CacheOptions {
            summonly: true,
            nodiscard: Some(false),
            ..Default::default()
        };
        assert_eq!(
            build_cache_uri("T", &release).unwrap(),
            "/CICSSystemManagement/CICSResultCache/T?SUMMONLY"
        );
    }

    #[test]
    fn test_cache_token_required() {
        let missing = build_cache_uri(None::<&str>, &CacheOptions::default()).unwrap_err();
        assert_eq!(missing.to_string(), "CICS result cache token is required");

        let blank = build_cache_uri("  ", &CacheOptions::default()).unwrap_err();
        assert_eq!(
            blank.to_string(),
            "Required parameter 'CICS Result Cache Token' must not be blank"
        );
    }
}
