pub mod admin;
pub mod campaigns;
pub mod clients;
pub mod health;
pub mod imeis;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` router tree.
///
/// ```text
/// /clientes   store login (public)
/// /bajas      active campaigns (public)
/// /imeis      batch registration (public)
/// /admin      admin login and the authenticated panel
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clientes", clients::router())
        .nest("/bajas", campaigns::router())
        .nest("/imeis", imeis::router())
        .nest("/admin", admin::router())
}
