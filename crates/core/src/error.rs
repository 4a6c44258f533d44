//! Domain errors shared by the registration service crates.
//!
//! The HTTP layer maps each variant to a status code; the `code` string
//! reported alongside the message comes from [`CoreError::code`].

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A model, client or campaign id that does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: a missing required field or a bad IMEI.
    #[error("{0}")]
    Validation(String),

    /// The operation would break a uniqueness or reference rule.
    #[error("{0}")]
    Conflict(String),

    /// Missing credentials, or credentials that do not match.
    #[error("{0}")]
    Unauthorized(String),

    /// Credentials were presented but are not acceptable.
    #[error("{0}")]
    Forbidden(String),
}

impl CoreError {
    /// Machine-readable code placed in the `code` field of error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::Forbidden(_) => "FORBIDDEN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Campaign",
            id: 42,
        };
        assert_eq!(err.to_string(), "Campaign with id 42 not found");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn message_variants_display_their_message() {
        let err = CoreError::Conflict("El Código SAP ya existe".into());
        assert_eq!(err.to_string(), "El Código SAP ya existe");
        assert_eq!(err.code(), "CONFLICT");

        let err = CoreError::Validation("registros must not be empty".into());
        assert_eq!(err.to_string(), "registros must not be empty");
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn auth_variants_have_distinct_codes() {
        assert_eq!(CoreError::Unauthorized(String::new()).code(), "UNAUTHORIZED");
        assert_eq!(CoreError::Forbidden(String::new()).code(), "FORBIDDEN");
    }
}
