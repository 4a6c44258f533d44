//! Client (business account) model and DTOs.

use baja_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    #[serde(rename = "codigo_sap")]
    pub sap_code: String,
    #[serde(rename = "nombre_negocio")]
    pub business_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client. The SAP code is upper-cased before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    #[serde(rename = "codigo_sap", default)]
    pub sap_code: String,
    #[serde(rename = "nombre_negocio", default)]
    pub business_name: String,
}

/// DTO for updating a client.
///
/// The SAP code is the client's identity and cannot change; it may be echoed
/// back by the caller but must match the stored code.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClient {
    #[serde(rename = "codigo_sap")]
    pub sap_code: Option<String>,
    #[serde(rename = "nombre_negocio", default)]
    pub business_name: String,
}

/// Request body for the public client login.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientLogin {
    #[serde(rename = "codigo_sap", default)]
    pub sap_code: String,
}
