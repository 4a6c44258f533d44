//! Route definitions for the admin panel.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{auth, campaigns, clients, models, registrations};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Everything except `/login` requires an admin bearer token.
///
/// ```text
/// POST   /login                          -> auth::login
///
/// GET    /modelos                        -> models::list
/// POST   /modelos                        -> models::create
/// PUT    /modelos/{id}                   -> models::update
/// DELETE /modelos/{id}                   -> models::delete
///
/// GET    /bajas                          -> campaigns::list
/// POST   /bajas                          -> campaigns::create
/// PUT    /bajas/{id}                     -> campaigns::update
/// DELETE /bajas/{id}                     -> campaigns::delete
/// PUT    /bajas/{id}/toggle              -> campaigns::toggle
/// POST   /bajas/{id}/modelos             -> campaigns::add_model
/// DELETE /bajas/{id}/modelos/{model_id}  -> campaigns::remove_model
///
/// GET    /clientes                       -> clients::list
/// POST   /clientes                       -> clients::create
/// PUT    /clientes/{id}                  -> clients::update
/// DELETE /clientes/{id}                  -> clients::delete
///
/// GET    /registros                      -> registrations::list
/// GET    /registros/export               -> registrations::export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        // Device models
        .route("/modelos", get(models::list).post(models::create))
        .route("/modelos/{id}", put(models::update).delete(models::delete))
        // Campaigns
        .route("/bajas", get(campaigns::list).post(campaigns::create))
        .route("/bajas/{id}", put(campaigns::update).delete(campaigns::delete))
        .route("/bajas/{id}/toggle", put(campaigns::toggle))
        .route("/bajas/{id}/modelos", post(campaigns::add_model))
        .route(
            "/bajas/{id}/modelos/{model_id}",
            delete(campaigns::remove_model),
        )
        // Clients
        .route("/clientes", get(clients::list).post(clients::create))
        .route("/clientes/{id}", put(clients::update).delete(clients::delete))
        // Registrations
        .route("/registros", get(registrations::list))
        .route("/registros/export", get(registrations::export))
}
