//! Shared input validation helpers.
//!
//! DTOs derive [`validator::Validate`]; [`validate_input`] turns a failed
//! check into [`CoreError::Validation`]. Field-level custom checks used by
//! several DTOs live here too.

use validator::Validate;

use crate::error::CoreError;

/// Currency applied when a line item does not name one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Run the derived validator and convert its errors.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

/// A currency is a three-letter ISO-style code.
pub fn validate_currency(value: &str) -> Result<(), CoreError> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency '{value}'. Must be a three-letter code"
        )))
    }
}

/// Trim and upper-case a currency code, falling back to [`DEFAULT_CURRENCY`].
///
/// The normalized code is validated, so `"eur"` passes and `"euro"` fails.
pub fn normalize_currency(value: Option<&str>) -> Result<String, CoreError> {
    let code = match value.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_ascii_uppercase(),
        _ => DEFAULT_CURRENCY.to_string(),
    };
    validate_currency(&code)?;
    Ok(code)
}

/// Error for a patch that carries no fields at all.
pub fn empty_patch() -> CoreError {
    CoreError::Validation("At least one field must be provided".to_string())
}

/// Trim an optional string, mapping whitespace-only values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_accepts_three_letters() {
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("usd").is_ok());
    }

    #[test]
    fn currency_rejects_other_shapes() {
        assert!(validate_currency("EURO").is_err());
        assert!(validate_currency("E1R").is_err());
        assert!(validate_currency("").is_err());
    }

    #[test]
    fn normalize_currency_uppercases_and_defaults() {
        assert_eq!(normalize_currency(Some(" gbp ")).unwrap(), "GBP");
        assert_eq!(normalize_currency(Some("")).unwrap(), "EUR");
        assert_eq!(normalize_currency(None).unwrap(), "EUR");
    }

    #[test]
    fn normalize_currency_rejects_long_codes() {
        assert!(normalize_currency(Some("euro")).is_err());
    }

    #[test]
    fn trim_optional_drops_blank() {
        assert_eq!(trim_optional(Some("  hi ".into())), Some("hi".to_string()));
        assert_eq!(trim_optional(Some("   ".into())), None);
        assert_eq!(trim_optional(None), None);
    }
}
