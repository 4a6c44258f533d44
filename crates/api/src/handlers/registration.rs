//! Handler for batch IMEI registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use baja_core::registration::{registered_message, RegisterBatch};
use baja_db::repositories::RegistrationRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisteredBody {
    pub message: String,
    pub inserted: u64,
}

/// POST /api/imeis/registrar
///
/// Insert every `(modelo_id, imei)` pair of one campaign in a single
/// transaction. Any store failure rolls the whole batch back and is reported
/// as a generic 500; constraint names never reach the caller.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterBatch>,
) -> AppResult<(StatusCode, Json<OkResponse<RegisteredBody>>)> {
    let batch = input.into_validated()?;

    let inserted = RegistrationRepo::register_batch(&state.pool, &batch)
        .await
        .map_err(|e| {
            AppError::InternalError(format!(
                "IMEI batch for campaign {} rolled back: {e}",
                batch.campaign_id
            ))
        })?;

    tracing::info!(
        client_sap = %batch.client_sap,
        campaign_id = batch.campaign_id,
        inserted,
        "IMEI batch registered"
    );

    let body = RegisteredBody {
        message: registered_message(inserted as usize),
        inserted,
    };
    Ok((StatusCode::CREATED, Json(OkResponse::new(body))))
}
