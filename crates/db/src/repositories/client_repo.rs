//! Repository for the `clients` table.

use baja_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::Client;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, sap_code, business_name, created_at, updated_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client. `sap_code` must already be normalized.
    pub async fn create(
        pool: &PgPool,
        sap_code: &str,
        business_name: &str,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (sap_code, business_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(sap_code)
            .bind(business_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by its (normalized) SAP code.
    pub async fn find_by_sap_code(
        pool: &PgPool,
        sap_code: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE sap_code = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(sap_code)
            .fetch_optional(pool)
            .await
    }

    /// List all clients ordered by business name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY business_name ASC, id ASC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Rename a client. Returns `None` if no row with the given `id` exists.
    pub async fn update_name(
        pool: &PgPool,
        id: DbId,
        business_name: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET business_name = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(business_name)
            .fetch_optional(pool)
            .await
    }

    /// Whether any registered IMEI references this client.
    pub async fn has_registrations(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM registered_imeis r
                JOIN clients c ON c.sap_code = r.client_sap_code
                WHERE c.id = $1
             )",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Delete a client by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
