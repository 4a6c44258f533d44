//! Repository for the `device_models` table.

use baja_core::types::DbId;
use sqlx::PgPool;

use crate::models::device_model::DeviceModel;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for device models.
pub struct DeviceModelRepo;

impl DeviceModelRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<DeviceModel, sqlx::Error> {
        let query = format!("INSERT INTO device_models (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, DeviceModel>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DeviceModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_models WHERE id = $1");
        sqlx::query_as::<_, DeviceModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all models ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<DeviceModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM device_models ORDER BY name");
        sqlx::query_as::<_, DeviceModel>(&query).fetch_all(pool).await
    }

    /// Rename a model. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<DeviceModel>, sqlx::Error> {
        let query =
            format!("UPDATE device_models SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, DeviceModel>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a model by ID. Returns `true` if a row was removed.
    ///
    /// Fails with `fk_campaign_models_model` while any campaign links it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM device_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
