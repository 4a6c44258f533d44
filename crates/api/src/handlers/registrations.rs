//! Handlers for the admin view of registered IMEIs: paginated listing and
//! spreadsheet export. Both share one filter predicate.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use baja_core::pagination::{total_pages, PageRequest};
use baja_db::models::registration::RegistrationRow;
use baja_db::repositories::RegistrationRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::export::{write_registrations_xlsx, EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use crate::extract::ValidQuery;
use crate::middleware::auth::AuthAdmin;
use crate::query::RegistrationQuery;
use crate::response::OkResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct RegistrationsBody {
    #[serde(rename = "registros")]
    pub rows: Vec<RegistrationRow>,
    pub pagination: Pagination,
}

/// GET /api/admin/registros?page=&limit=&bajaId=&search=
///
/// Newest registrations first. `search` matches IMEI, business name or SAP
/// code as a literal, case-insensitive substring.
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RegistrationQuery>,
) -> AppResult<Json<OkResponse<RegistrationsBody>>> {
    let page = PageRequest::new(params.page, params.limit);
    let filter = params.filter();

    let total_items = RegistrationRepo::count(&state.pool, &filter).await?;
    let rows = RegistrationRepo::list_page(&state.pool, &filter, page).await?;

    Ok(Json(OkResponse::new(RegistrationsBody {
        rows,
        pagination: Pagination {
            current_page: page.page,
            total_pages: total_pages(total_items, page.limit),
            total_items,
            limit: page.limit,
        },
    })))
}

/// GET /api/admin/registros/export?bajaId=&search=
///
/// The full filtered set as an `.xlsx` download, ordered by campaign date,
/// SAP code and model name.
pub async fn export(
    admin: AuthAdmin,
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<RegistrationQuery>,
) -> AppResult<impl IntoResponse> {
    let rows = RegistrationRepo::list_for_export(&state.pool, &params.filter()).await?;

    let bytes = write_registrations_xlsx(&rows)
        .map_err(|e| AppError::InternalError(format!("Excel export failed: {e}")))?;

    tracing::info!(
        rows = rows.len(),
        campaign_id = ?params.campaign_id,
        admin = %admin.username,
        "Registrations exported"
    );

    let disposition = format!("attachment; filename=\"{EXPORT_FILENAME}\"");
    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
