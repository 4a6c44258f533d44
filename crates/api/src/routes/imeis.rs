//! Route definitions for the `/imeis` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::registration;
use crate::state::AppState;

/// Routes mounted at `/imeis`.
///
/// ```text
/// POST /registrar  -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/registrar", post(registration::register))
}
