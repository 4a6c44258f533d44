//! Route definitions for the store-facing `/clientes` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::client_portal;
use crate::state::AppState;

/// Routes mounted at `/clientes`.
///
/// ```text
/// POST /login  -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(client_portal::login))
}
