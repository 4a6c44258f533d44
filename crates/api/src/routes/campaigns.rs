//! Route definitions for the store-facing `/bajas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::client_portal;
use crate::state::AppState;

/// Routes mounted at `/bajas`.
///
/// ```text
/// GET /activas  -> active_campaigns
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/activas", get(client_portal::active_campaigns))
}
