//! Handlers for campaigns (`/api/admin/bajas`) and their model links.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use baja_core::clients::require_text;
use baja_core::error::CoreError;
use baja_core::types::DbId;
use baja_db::models::campaign::{Campaign, CampaignInput, CampaignWithModels, LinkModel};
use baja_db::repositories::{CampaignRepo, DeviceModelRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthAdmin;
use crate::response::{MessageResponse, OkResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CampaignsBody {
    #[serde(rename = "bajas")]
    pub campaigns: Vec<CampaignWithModels>,
}

#[derive(Debug, Serialize)]
pub struct CampaignBody {
    #[serde(rename = "baja")]
    pub campaign: Campaign,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Campaign",
        id,
    })
}

// ---------------------------------------------------------------------------
// Campaign CRUD
// ---------------------------------------------------------------------------

/// GET /api/admin/bajas
///
/// Every campaign, newest first, active or not, each with its models.
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<OkResponse<CampaignsBody>>> {
    let campaigns = CampaignRepo::list_with_models(&state.pool).await?;
    Ok(Json(OkResponse::new(CampaignsBody { campaigns })))
}

/// POST /api/admin/bajas
///
/// New campaigns start active.
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CampaignInput>,
) -> AppResult<(StatusCode, Json<OkResponse<CampaignBody>>)> {
    let name = require_text("nombre_baja", &input.name)?;
    let campaign = CampaignRepo::create(&state.pool, &name, input.campaign_date).await?;

    tracing::info!(campaign_id = campaign.id, admin = %admin.username, "Campaign created");

    Ok((
        StatusCode::CREATED,
        Json(OkResponse::new(CampaignBody { campaign })),
    ))
}

/// PUT /api/admin/bajas/{id}
pub async fn update(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<CampaignInput>,
) -> AppResult<Json<OkResponse<CampaignBody>>> {
    let name = require_text("nombre_baja", &input.name)?;
    let campaign = CampaignRepo::update(&state.pool, id, &name, input.campaign_date)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(campaign_id = id, admin = %admin.username, "Campaign updated");

    Ok(Json(OkResponse::new(CampaignBody { campaign })))
}

/// PUT /api/admin/bajas/{id}/toggle
///
/// Flip the active flag. Inactive campaigns disappear from the store app.
pub async fn toggle(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OkResponse<CampaignBody>>> {
    let campaign = CampaignRepo::toggle_active(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        campaign_id = id,
        is_active = campaign.is_active,
        admin = %admin.username,
        "Campaign toggled"
    );

    Ok(Json(OkResponse::new(CampaignBody { campaign })))
}

/// DELETE /api/admin/bajas/{id}
///
/// Model links go with the campaign. Refused with 409 while any IMEI is
/// registered against it.
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !CampaignRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(campaign_id = id, admin = %admin.username, "Campaign deleted");

    Ok(Json(MessageResponse::new("Campaña eliminada")))
}

// ---------------------------------------------------------------------------
// Model links
// ---------------------------------------------------------------------------

/// POST /api/admin/bajas/{id}/modelos
///
/// Link a model. 409 when either side is missing or the link exists.
pub async fn add_model(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<LinkModel>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let campaign_exists = CampaignRepo::find_by_id(&state.pool, id).await?.is_some();
    let model_exists = DeviceModelRepo::find_by_id(&state.pool, input.model_id)
        .await?
        .is_some();
    if !campaign_exists || !model_exists {
        return Err(AppError::Core(CoreError::Conflict(
            "La campaña o el modelo no existe.".into(),
        )));
    }

    CampaignRepo::add_model(&state.pool, id, input.model_id).await?;

    tracing::info!(
        campaign_id = id,
        model_id = input.model_id,
        admin = %admin.username,
        "Model linked to campaign"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Modelo asignado a la campaña")),
    ))
}

/// DELETE /api/admin/bajas/{id}/modelos/{model_id}
pub async fn remove_model(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path((id, model_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    if !CampaignRepo::remove_model(&state.pool, id, model_id).await? {
        return Err(AppError::NotFound(format!(
            "Model {model_id} is not linked to campaign {id}"
        )));
    }

    tracing::info!(
        campaign_id = id,
        model_id,
        admin = %admin.username,
        "Model unlinked from campaign"
    );

    Ok(Json(MessageResponse::new("Modelo desasignado de la campaña")))
}
