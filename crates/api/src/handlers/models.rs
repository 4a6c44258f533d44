//! Handlers for the device model catalog (`/api/admin/modelos`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use baja_core::clients::require_text;
use baja_core::error::CoreError;
use baja_core::types::DbId;
use baja_db::models::device_model::{DeviceModel, ModelInput};
use baja_db::repositories::DeviceModelRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthAdmin;
use crate::response::{MessageResponse, OkResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsBody {
    #[serde(rename = "modelos")]
    pub models: Vec<DeviceModel>,
}

#[derive(Debug, Serialize)]
pub struct ModelBody {
    #[serde(rename = "modelo")]
    pub model: DeviceModel,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DeviceModel",
        id,
    })
}

/// GET /api/admin/modelos
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<OkResponse<ModelsBody>>> {
    let models = DeviceModelRepo::list(&state.pool).await?;
    Ok(Json(OkResponse::new(ModelsBody { models })))
}

/// POST /api/admin/modelos
///
/// Duplicate names surface as 409 through the unique constraint.
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ModelInput>,
) -> AppResult<(StatusCode, Json<OkResponse<ModelBody>>)> {
    let name = require_text("nombre_modelo", &input.name)?;
    let model = DeviceModelRepo::create(&state.pool, &name).await?;

    tracing::info!(model_id = model.id, admin = %admin.username, "Device model created");

    Ok((StatusCode::CREATED, Json(OkResponse::new(ModelBody { model }))))
}

/// PUT /api/admin/modelos/{id}
pub async fn update(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<ModelInput>,
) -> AppResult<Json<OkResponse<ModelBody>>> {
    let name = require_text("nombre_modelo", &input.name)?;
    let model = DeviceModelRepo::update(&state.pool, id, &name)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(model_id = id, admin = %admin.username, "Device model renamed");

    Ok(Json(OkResponse::new(ModelBody { model })))
}

/// DELETE /api/admin/modelos/{id}
///
/// Refused with 409 while the model is linked to a campaign or referenced by
/// a registration.
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !DeviceModelRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(model_id = id, admin = %admin.username, "Device model deleted");

    Ok(Json(MessageResponse::new("Modelo eliminado")))
}
