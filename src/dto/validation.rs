//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that an identity field (team, contest, or jury id) carries a
/// non-empty value once surrounding whitespace is stripped.
///
/// # Examples
///
/// ```ignore
/// validate_identity("team-1") // Ok
/// validate_identity("   ")    // Err - blank
/// validate_identity("")       // Err - empty
/// ```
pub fn validate_identity(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("identity_empty");
        err.message = Some("identity fields must not be empty".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identity_valid() {
        assert!(validate_identity("team-1").is_ok());
        assert!(validate_identity("visit-card").is_ok());
        assert!(validate_identity("6").is_ok());
    }

    #[test]
    fn test_validate_identity_invalid() {
        assert!(validate_identity("").is_err());
        assert!(validate_identity(" ").is_err());
        assert!(validate_identity("\t\n").is_err());
    }
}
