//! # Validation Utilities
//!
//! Input validation helpers for form fields. Errors are plain strings meant to be shown
//! next to the offending field.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a non-negative base-10 integer (no sign, no fraction, no exponent).
pub fn validate_unsigned_integer(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;
    if value.trim().chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!("{} must be a whole number", field_name))
    }
}

/// Validate a positive decimal amount such as `1.25`.
///
/// Scale is checked later against the token decimals; this only rejects shapes
/// that can never be an amount.
pub fn validate_decimal_amount(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;
    let value = value.trim();

    let mut parts = value.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction) {
        return Err(format!("{} must be a positive number", field_name));
    }

    if value.chars().all(|c| c == '0' || c == '.') {
        return Err(format!("{} must be greater than zero", field_name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty() {
        assert!(validate_not_empty("Token", "Name").is_ok());
        assert_eq!(validate_not_empty("   ", "Name"), Err("Name cannot be empty".to_string()));
    }

    #[test]
    fn test_unsigned_integer() {
        assert!(validate_unsigned_integer("1000000", "Supply").is_ok());
        assert!(validate_unsigned_integer("-5", "Supply").is_err());
        assert!(validate_unsigned_integer("1.5", "Supply").is_err());
        assert!(validate_unsigned_integer("1e6", "Supply").is_err());
    }

    #[test]
    fn test_decimal_amount() {
        assert!(validate_decimal_amount("1.25", "Amount").is_ok());
        assert!(validate_decimal_amount(".5", "Amount").is_ok());
        assert!(validate_decimal_amount("10", "Amount").is_ok());
        assert!(validate_decimal_amount("0", "Amount").is_err());
        assert!(validate_decimal_amount("0.000", "Amount").is_err());
        assert!(validate_decimal_amount(".", "Amount").is_err());
        assert!(validate_decimal_amount("1.2.3", "Amount").is_err());
        assert!(validate_decimal_amount("-1", "Amount").is_err());
        assert!(validate_decimal_amount("abc", "Amount").is_err());
    }
}
