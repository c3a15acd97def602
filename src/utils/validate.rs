use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DashboardError, Result};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"));

/// Table and column names are interpolated into SQL, so only plain identifiers pass
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 64 {
        return Err(DashboardError::validation(format!(
            "Identifier length must be between 1 and 64 characters: '{name}'"
        )));
    }
    if !IDENTIFIER_RE.is_match(name) {
        return Err(DashboardError::validation(format!(
            "Identifier must contain only letters, digits or underscores: '{name}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("tvet15m").is_ok());
        assert!(validate_identifier("student_internships_15m").is_ok());
        assert!(validate_identifier("_hidden").is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("15m").is_err());
        assert!(validate_identifier("users; DROP TABLE x").is_err());
        assert!(validate_identifier("name\"").is_err());
        assert!(validate_identifier(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_error_is_validation() {
        let err = validate_identifier("a-b").unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
