//! Repository for the `campaigns` and `campaign_models` tables.

use std::collections::HashMap;

use baja_core::types::{CalendarDate, DbId};
use sqlx::PgPool;

use crate::models::campaign::{ActiveCampaign, Campaign, CampaignModelLink, CampaignWithModels};
use crate::models::device_model::ModelSummary;

/// Column list for the `campaigns` table.
const COLUMNS: &str = "id, name, campaign_date, is_active, created_at, updated_at";

/// Provides CRUD operations for campaigns and their model links.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign. New campaigns start active.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        campaign_date: CalendarDate,
    ) -> Result<Campaign, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaigns (name, campaign_date)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(name)
            .bind(campaign_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every campaign, newest first, each with its linked models.
    pub async fn list_with_models(pool: &PgPool) -> Result<Vec<CampaignWithModels>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns ORDER BY campaign_date DESC, id DESC"
        );
        let campaigns = sqlx::query_as::<_, Campaign>(&query)
            .fetch_all(pool)
            .await?;
        Self::attach_models(pool, campaigns).await
    }

    /// Active campaigns that have at least one linked model, newest first.
    ///
    /// This is what the store-facing app may register against.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<ActiveCampaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns
             WHERE is_active = TRUE
             ORDER BY campaign_date DESC, id DESC"
        );
        let campaigns = sqlx::query_as::<_, Campaign>(&query)
            .fetch_all(pool)
            .await?;
        let with_models = Self::attach_models(pool, campaigns).await?;

        Ok(with_models
            .into_iter()
            .filter(|c| !c.models.is_empty())
            .map(ActiveCampaign::from)
            .collect())
    }

    /// Update name and date. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
        campaign_date: CalendarDate,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET name = $2, campaign_date = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(name)
            .bind(campaign_date)
            .fetch_optional(pool)
            .await
    }

    /// Flip the active flag. Returns `None` if no row with the given `id` exists.
    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET is_active = NOT is_active
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign by ID. Returns `true` if a row was removed.
    ///
    /// Model links cascade. Fails with `fk_registered_imeis_campaign` while
    /// any IMEI is registered against the campaign.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Link a model to a campaign.
    ///
    /// Fails with `uq_campaign_models` when the link exists, or with a
    /// `fk_campaign_models_*` violation when either side is missing.
    pub async fn add_model(
        pool: &PgPool,
        campaign_id: DbId,
        model_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO campaign_models (campaign_id, model_id) VALUES ($1, $2)")
            .bind(campaign_id)
            .bind(model_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Unlink a model from a campaign. Returns `true` if a link was removed.
    pub async fn remove_model(
        pool: &PgPool,
        campaign_id: DbId,
        model_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM campaign_models WHERE campaign_id = $1 AND model_id = $2")
                .bind(campaign_id)
                .bind(model_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Models linked to one campaign, ordered by name.
    pub async fn models_for(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<ModelSummary>, sqlx::Error> {
        sqlx::query_as::<_, ModelSummary>(
            "SELECT m.id, m.name FROM campaign_models cm
             JOIN device_models m ON m.id = cm.model_id
             WHERE cm.campaign_id = $1
             ORDER BY m.name",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch the links of all given campaigns in one query and nest them.
    async fn attach_models(
        pool: &PgPool,
        campaigns: Vec<Campaign>,
    ) -> Result<Vec<CampaignWithModels>, sqlx::Error> {
        let ids: Vec<DbId> = campaigns.iter().map(|c| c.id).collect();
        let links = sqlx::query_as::<_, CampaignModelLink>(
            "SELECT cm.campaign_id, m.id AS model_id, m.name AS model_name
             FROM campaign_models cm
             JOIN device_models m ON m.id = cm.model_id
             WHERE cm.campaign_id = ANY($1)
             ORDER BY m.name",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut by_campaign: HashMap<DbId, Vec<ModelSummary>> = HashMap::new();
        for link in links {
            by_campaign
                .entry(link.campaign_id)
                .or_default()
                .push(ModelSummary {
                    id: link.model_id,
                    name: link.model_name,
                });
        }

        Ok(campaigns
            .into_iter()
            .map(|campaign| {
                let models = by_campaign.remove(&campaign.id).unwrap_or_default();
                CampaignWithModels { campaign, models }
            })
            .collect())
    }
}
