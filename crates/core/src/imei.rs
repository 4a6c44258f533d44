//! IMEI format validation.
//!
//! A registrable IMEI is exactly fifteen ASCII digits. The same pattern is
//! enforced by the `registered_imeis.imei` CHECK constraint.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Number of digits in a registrable IMEI.
pub const IMEI_LENGTH: usize = 15;

/// ASCII-only on purpose: `\d` would also accept non-Latin digits.
const IMEI_PATTERN: &str = r"^[0-9]{15}$";

static IMEI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IMEI_PATTERN).expect("valid regex"));

/// Whether `value` is exactly fifteen ASCII digits.
///
/// # Examples
///
/// ```
/// use baja_core::imei::is_valid_imei;
/// assert!(is_valid_imei("123456789012345"));
/// assert!(!is_valid_imei("12345678901234"));
/// assert!(!is_valid_imei("12345678901234a"));
/// ```
pub fn is_valid_imei(value: &str) -> bool {
    IMEI_RE.is_match(value)
}

/// Validate an IMEI, returning a [`CoreError::Validation`] naming the value.
pub fn validate_imei(value: &str) -> Result<(), CoreError> {
    if is_valid_imei(value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid IMEI '{value}': must be exactly {IMEI_LENGTH} digits"
        )))
    }
}
