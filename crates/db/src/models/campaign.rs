//! Campaign ("baja") model, campaign-model links and DTOs.

use baja_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::device_model::ModelSummary;

/// A row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    #[serde(rename = "nombre_baja")]
    pub name: String,
    #[serde(rename = "fecha_baja")]
    pub campaign_date: CalendarDate,
    #[serde(rename = "esta_activa")]
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A campaign with its linked models, as listed in the admin view.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignWithModels {
    #[serde(flatten)]
    pub campaign: Campaign,
    #[serde(rename = "modelos")]
    pub models: Vec<ModelSummary>,
}

/// What the store-facing client app sees for an active campaign.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveCampaign {
    pub id: DbId,
    #[serde(rename = "nombre_baja")]
    pub name: String,
    #[serde(rename = "fecha_baja")]
    pub campaign_date: CalendarDate,
    #[serde(rename = "modelos")]
    pub models: Vec<ModelSummary>,
}

impl From<CampaignWithModels> for ActiveCampaign {
    fn from(value: CampaignWithModels) -> Self {
        Self {
            id: value.campaign.id,
            name: value.campaign.name,
            campaign_date: value.campaign.campaign_date,
            models: value.models,
        }
    }
}

/// One `campaign_models` row joined with the model name.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignModelLink {
    pub campaign_id: DbId,
    pub model_id: DbId,
    pub model_name: String,
}

/// DTO for creating or editing a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignInput {
    #[serde(rename = "nombre_baja", default)]
    pub name: String,
    #[serde(rename = "fecha_baja")]
    pub campaign_date: CalendarDate,
}

/// DTO for linking a model to a campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkModel {
    #[serde(rename = "modelo_id")]
    pub model_id: DbId,
}
