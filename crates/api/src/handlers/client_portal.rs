//! Handlers for the store-facing app: SAP-code login and campaign lookup.
//!
//! These routes are public. A store identifies itself by SAP code only.

use axum::extract::State;
use axum::Json;
use baja_core::clients::require_sap_code;
use baja_db::models::campaign::ActiveCampaign;
use baja_db::models::client::ClientLogin;
use baja_db::repositories::{CampaignRepo, ClientRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::handlers::clients::ClientBody;
use crate::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ActiveCampaignsBody {
    #[serde(rename = "bajas")]
    pub campaigns: Vec<ActiveCampaign>,
}

/// POST /api/clientes/login
///
/// Resolve a store by SAP code. The code is trimmed and upper-cased first.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ClientLogin>,
) -> AppResult<Json<OkResponse<ClientBody>>> {
    let sap_code = require_sap_code(&input.sap_code)?;

    let client = ClientRepo::find_by_sap_code(&state.pool, &sap_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente no encontrado".into()))?;

    tracing::info!(client_id = client.id, sap_code = %client.sap_code, "Client logged in");

    Ok(Json(OkResponse::new(ClientBody { client })))
}

/// GET /api/bajas/activas
///
/// Active campaigns that have at least one linked model, newest first.
pub async fn active_campaigns(
    State(state): State<AppState>,
) -> AppResult<Json<OkResponse<ActiveCampaignsBody>>> {
    let campaigns = CampaignRepo::list_active(&state.pool).await?;
    Ok(Json(OkResponse::new(ActiveCampaignsBody { campaigns })))
}
