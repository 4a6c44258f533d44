//! Device model catalog entries.

use baja_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `device_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DeviceModel {
    pub id: DbId,
    #[serde(rename = "nombre_modelo")]
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Id and name only, as nested under a campaign.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ModelSummary {
    pub id: DbId,
    #[serde(rename = "nombre_modelo")]
    pub name: String,
}

/// DTO for creating or renaming a model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInput {
    #[serde(rename = "nombre_modelo", default)]
    pub name: String,
}
