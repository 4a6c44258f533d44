//! Registered-IMEI ledger rows and listing filters.

use baja_core::pagination::contains_pattern;
use baja_core::types::{CalendarDate, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A registration joined with client, model and campaign for the admin list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationRow {
    pub imei: String,
    #[serde(rename = "fecha_registro")]
    pub registered_at: Timestamp,
    #[serde(rename = "nombre_negocio")]
    pub business_name: String,
    #[serde(rename = "codigo_sap")]
    pub sap_code: String,
    #[serde(rename = "nombre_modelo")]
    pub model_name: String,
    #[serde(rename = "nombre_baja")]
    pub campaign_name: String,
    #[serde(rename = "fecha_baja")]
    pub campaign_date: CalendarDate,
}

/// The fixed spreadsheet export columns.
#[derive(Debug, Clone, FromRow)]
pub struct ExportRow {
    pub sap_code: String,
    pub model_name: String,
    pub imei: String,
    pub campaign_date: CalendarDate,
}

/// Filter shared by the paginated list, its count, and the export.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    pub campaign_id: Option<DbId>,
    pub search: Option<String>,
}

impl RegistrationFilter {
    /// The escaped `ILIKE` pattern for `search`, or `None` when blank.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().and_then(contains_pattern)
    }
}
