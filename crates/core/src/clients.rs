//! Client (business account) identity rules.

use crate::error::CoreError;

/// Normalize a SAP code for storage and lookup: trimmed and upper-cased.
///
/// # Examples
///
/// ```
/// use baja_core::clients::normalize_sap_code;
/// assert_eq!(normalize_sap_code("  c1001 "), "C1001");
/// ```
pub fn normalize_sap_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize a SAP code and reject it if nothing is left.
pub fn require_sap_code(raw: &str) -> Result<String, CoreError> {
    let code = normalize_sap_code(raw);
    if code.is_empty() {
        return Err(CoreError::Validation("codigo_sap is required".into()));
    }
    Ok(code)
}

/// Trim a required free-text field, rejecting blank values.
pub fn require_text(field: &str, raw: &str) -> Result<String, CoreError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
