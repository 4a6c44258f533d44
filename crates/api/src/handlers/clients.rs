//! Handlers for client management (`/api/admin/clientes`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use baja_core::clients::{normalize_sap_code, require_sap_code, require_text};
use baja_core::error::CoreError;
use baja_core::types::DbId;
use baja_db::models::client::{Client, CreateClient, UpdateClient};
use baja_db::repositories::ClientRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthAdmin;
use crate::response::{MessageResponse, OkResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClientsBody {
    #[serde(rename = "clientes")]
    pub clients: Vec<Client>,
}

#[derive(Debug, Serialize)]
pub struct ClientBody {
    #[serde(rename = "cliente")]
    pub client: Client,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// GET /api/admin/clientes
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<OkResponse<ClientsBody>>> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(OkResponse::new(ClientsBody { clients })))
}

/// POST /api/admin/clientes
///
/// The SAP code is stored upper-cased; duplicates are a 409.
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateClient>,
) -> AppResult<(StatusCode, Json<OkResponse<ClientBody>>)> {
    let sap_code = require_sap_code(&input.sap_code)?;
    let business_name = require_text("nombre_negocio", &input.business_name)?;

    let client = ClientRepo::create(&state.pool, &sap_code, &business_name).await?;

    tracing::info!(
        client_id = client.id,
        sap_code = %client.sap_code,
        admin = %admin.username,
        "Client created"
    );

    Ok((StatusCode::CREATED, Json(OkResponse::new(ClientBody { client }))))
}

/// PUT /api/admin/clientes/{id}
///
/// Only the business name can change. A `codigo_sap` in the body must match
/// the stored code.
pub async fn update(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidJson(input): ValidJson<UpdateClient>,
) -> AppResult<Json<OkResponse<ClientBody>>> {
    let business_name = require_text("nombre_negocio", &input.business_name)?;

    let existing = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(requested) = input.sap_code.as_deref() {
        let requested = normalize_sap_code(requested);
        if !requested.is_empty() && requested != existing.sap_code {
            return Err(AppError::BadRequest(
                "El Código SAP no se puede modificar".into(),
            ));
        }
    }

    let client = ClientRepo::update_name(&state.pool, id, &business_name)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(client_id = id, admin = %admin.username, "Client renamed");

    Ok(Json(OkResponse::new(ClientBody { client })))
}

/// DELETE /api/admin/clientes/{id}
///
/// Refused with 409 while any registration references the client.
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if ClientRepo::has_registrations(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "No se puede eliminar un cliente con IMEIs ya registrados.".into(),
        )));
    }

    if !ClientRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(client_id = id, admin = %admin.username, "Client deleted");

    Ok(Json(MessageResponse::new("Cliente eliminado")))
}
