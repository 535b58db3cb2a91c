//! Required-parameter checks
//!
//! Parameters are checked in two tiers: a field that was never supplied
//! fails with the caller's "is required" message, a field that was supplied
//! but is blank fails with a message naming the parameter label.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The parameter was not supplied at all
    #[error("{message}")]
    Missing { label: String, message: String },

    /// The parameter was supplied but is empty or whitespace
    #[error("Required parameter '{label}' must not be blank")]
    Blank { label: String },

    /// The parameter is not one of the accepted values
    #[error("Required parameter '{label}' must be one of [{}], got '{value}'", .allowed.join(", "))]
    NotOneOf {
        label: String,
        value: String,
        allowed: Vec<String>,
    },
}

impl ValidationError {
    /// Label of the offending parameter
    pub fn label(&self) -> &str {
        match self {
            ValidationError::Missing { label, .. }
            | ValidationError::Blank { label }
            | ValidationError::NotOneOf { label, .. } => label,
        }
    }
}

/// Require `value` to be present and not blank, returning it on success
pub fn defined_and_non_blank<'a>(
    value: Option<&'a str>,
    label: &str,
    missing_message: &str,
) -> Result<&'a str, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::Missing {
        label: label.to_string(),
        message: missing_message.to_string(),
    })?;

    if value.trim().is_empty() {
        return Err(ValidationError::Blank {
            label: label.to_string(),
        });
    }

    Ok(value)
}

/// Require `value` to be one of `allowed`
pub fn one_of<'a>(value: &'a str, allowed: &[&str], label: &str) -> Result<&'a str, ValidationError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::NotOneOf {
            label: label.to_string(),
            value: value.to_string(),
            allowed: allowed.iter().map(|a| a.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_uses_caller_message() {
        let err = defined_and_non_blank(None, "CICS Program name", "CICS program name is required")
            .unwrap_err();
        assert_eq!(err.to_string(), "CICS program name is required");
        assert_eq!(err.label(), "CICS Program name");
    }

    #[test]
    fn test_blank_names_the_label() {
        for blank in ["", "   ", "\t"] {
            let err = defined_and_non_blank(Some(blank), "CICS Program name", "unused").unwrap_err();
            assert_eq!(
                err.to_string(),
                "Required parameter 'CICS Program name' must not be blank"
            );
        }
    }

    #[test]
    fn test_present_value_is_returned_untrimmed() {
        assert_eq!(defined_and_non_blank(Some(" PGM1"), "l", "m").unwrap(), " PGM1");
    }

    #[test]
    fn test_one_of() {
        assert_eq!(one_of("https", &["http", "https"], "CICS URIMap Scheme").unwrap(), "https");
        let err = one_of("ftp", &["http", "https"], "CICS URIMap Scheme").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required parameter 'CICS URIMap Scheme' must be one of [http, https], got 'ftp'"
        );
    }
}
