//! Parsed CMCI response envelope

use crate::constants::CmciResponseCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `<resultsummary>` attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultSummary {
    pub api_response1: String,
    pub api_response2: String,
    pub api_response1_alt: Option<String>,
    pub api_response2_alt: Option<String>,
    pub recordcount: Option<String>,
    pub displayed_recordcount: Option<String>,
    pub cachetoken: Option<String>,
}

impl ResultSummary {
    /// `api_response1 == "1024"` and `api_response2 == "0"`
    pub fn is_ok(&self) -> bool {
        self.api_response1 == "1024" && self.api_response2 == "0"
    }

    /// NODATA with a zero sub-code
    pub fn is_no_data(&self) -> bool {
        self.api_response1 == "1027" && self.api_response2 == "0"
    }

    pub fn response_code(&self) -> Option<CmciResponseCode> {
        self.api_response1
            .parse()
            .ok()
            .and_then(CmciResponseCode::from_code)
    }

    /// `recordcount` as a number; absent is zero, `None` when it is not a count
    pub fn checked_record_count(&self) -> Option<u64> {
        match self.recordcount.as_deref().map(str::trim) {
            None | Some("") => Some(0),
            Some(count) => count.parse().ok(),
        }
    }

    pub fn record_count(&self) -> u64 {
        self.checked_record_count().unwrap_or(0)
    }
}

/// `<feedback>` detail CMCI attaches to some rejections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feedback {
    pub resp: Option<String>,
    pub resp2: Option<String>,
    pub resp_alt: Option<String>,
    pub action: Option<String>,
    pub eibfn_alt: Option<String>,
    pub errorcode: Option<String>,
}

/// A parsed CMCI response
#[derive(Debug, Clone, PartialEq)]
pub struct CmciResponse {
    tree: Value,
}

impl CmciResponse {
    pub fn new(tree: Value) -> Self {
        Self { tree }
    }

    /// Whole parsed document, `{"response": {...}}`
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_tree(self) -> Value {
        self.tree
    }

    /// The `response` element, when present
    pub fn response(&self) -> Option<&Value> {
        self.tree.get("response")
    }

    pub fn result_summary(&self) -> Option<ResultSummary> {
        self.response()
            .and_then(|response| response.get("resultsummary"))
            .and_then(|summary| serde_json::from_value(summary.clone()).ok())
    }

    /// Records under `response.records.<tag>`, always as a list
    pub fn records(&self, tag: &str) -> Vec<&Value> {
        match self
            .response()
            .and_then(|response| response.get("records"))
            .and_then(|records| records.get(tag))
        {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::String(s)) if s.trim().is_empty() => Vec::new(),
            Some(record) => vec![record],
            None => Vec::new(),
        }
    }

    pub fn record_count(&self) -> u64 {
        self.result_summary()
            .map(|summary| summary.record_count())
            .unwrap_or(0)
    }

    pub fn cache_token(&self) -> Option<String> {
        self.result_summary().and_then(|summary| summary.cachetoken)
    }

    /// First `<feedback>` under the result summary or the response `<errors>`
    pub fn feedback(&self) -> Option<Feedback> {
        let response = self.response()?;
        let feedback = response
            .get("resultsummary")
            .and_then(|summary| summary.get("errors"))
            .or_else(|| response.get("errors"))
            .and_then(|errors| errors.get("feedback"))?;

        let first = match feedback {
            Value::Array(items) => items.first()?,
            single => single,
        };
        serde_json::from_value(first.clone()).ok()
    }

    /// Indented JSON rendering used in error messages
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.tree).unwrap_or_else(|_| self.tree.to_string())
    }
}

impl From<Value> for CmciResponse {
    fn from(tree: Value) -> Self {
        Self::new(tree)
    }
}
