use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use baja_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `baja_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A lookup by something other than the primary key found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error; the detail is logged, never returned.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => {
                let status = match core {
                    CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                    CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                    CoreError::Conflict(_) => StatusCode::CONFLICT,
                    CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
                };
                (status, core.code(), core.to_string())
            }

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "ok": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Constraint names whose violation is a user-facing conflict, with the
/// message shown to the admin.
///
/// Foreign keys on `campaign_models` also fire on insert; the link handler
/// checks both sides first so those names only surface on delete.
const KNOWN_CONSTRAINTS: &[(&str, &str)] = &[
    ("uq_device_models_name", "Ya existe un modelo con ese nombre."),
    ("uq_clients_sap_code", "El Código SAP ya existe"),
    ("uq_campaign_models", "El modelo ya está asignado a esta campaña."),
    (
        "fk_campaign_models_model",
        "No se puede eliminar un modelo que está asignado a una campaña.",
    ),
    ("fk_campaign_models_campaign", "La campaña no existe."),
    (
        "fk_registered_imeis_campaign",
        "No se puede eliminar una campaña que ya tiene IMEIs registrados.",
    ),
    (
        "fk_registered_imeis_client",
        "No se puede eliminar un cliente con IMEIs ya registrados.",
    ),
    (
        "fk_registered_imeis_model",
        "No se puede eliminar un modelo con IMEIs ya registrados.",
    ),
];

/// Look up the conflict message for a constraint name.
pub fn conflict_message(constraint: &str) -> Option<&'static str> {
    KNOWN_CONSTRAINTS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, msg)| *msg)
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique (23505) and foreign-key (23503) violations on a known constraint
///   map to 409 with a domain message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let code = db_err.code();
            if matches!(code.as_deref(), Some("23505") | Some("23503")) {
                if let Some(msg) = db_err.constraint().and_then(conflict_message) {
                    return (StatusCode::CONFLICT, "CONFLICT", msg.to_string());
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}
