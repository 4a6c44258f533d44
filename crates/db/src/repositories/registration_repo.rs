//! Repository for the `registered_imeis` ledger.
//!
//! Rows are only ever inserted here; nothing in the service updates or
//! deletes a registration.

use baja_core::pagination::PageRequest;
use baja_core::registration::RegisterBatch;
use sqlx::PgPool;

use crate::models::registration::{ExportRow, RegistrationFilter, RegistrationRow};

/// Joins shared by every listing query.
const FROM_JOINED: &str = "FROM registered_imeis r
     JOIN clients c ON c.sap_code = r.client_sap_code
     JOIN device_models m ON m.id = r.model_id
     JOIN campaigns b ON b.id = r.campaign_id";

/// Filter predicate shared by the count, page and export queries so the page
/// count always agrees with the rows returned. `$1` is the campaign id and
/// `$2` the escaped `ILIKE` pattern; either may be NULL.
const FILTER: &str = "WHERE ($1::BIGINT IS NULL OR r.campaign_id = $1)
       AND ($2::TEXT IS NULL
            OR r.imei ILIKE $2
            OR c.business_name ILIKE $2
            OR c.sap_code ILIKE $2)";

/// Batch inserts and filtered reads over registered IMEIs.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert every entry of `batch` inside one transaction.
    ///
    /// Returns the number of rows inserted. If any insert fails the
    /// transaction is dropped without commit, which rolls back the rows
    /// already written. The batch is expected to be validated.
    pub async fn register_batch(pool: &PgPool, batch: &RegisterBatch) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0u64;

        for entry in &batch.entries {
            let result = sqlx::query(
                "INSERT INTO registered_imeis (imei, client_sap_code, model_id, campaign_id, registered_at)
                 VALUES ($1, $2, $3, $4, NOW())",
            )
            .bind(&entry.imei)
            .bind(&batch.client_sap)
            .bind(entry.model_id)
            .bind(batch.campaign_id)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Count registrations matching `filter`.
    pub async fn count(pool: &PgPool, filter: &RegistrationFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(r.id) {FROM_JOINED} {FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(filter.campaign_id)
            .bind(filter.search_pattern())
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// One page of registrations matching `filter`, newest first.
    pub async fn list_page(
        pool: &PgPool,
        filter: &RegistrationFilter,
        page: PageRequest,
    ) -> Result<Vec<RegistrationRow>, sqlx::Error> {
        let query = format!(
            "SELECT r.imei, r.registered_at, c.business_name, c.sap_code,
                    m.name AS model_name, b.name AS campaign_name, b.campaign_date
             {FROM_JOINED}
             {FILTER}
             ORDER BY r.registered_at DESC, r.id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, RegistrationRow>(&query)
            .bind(filter.campaign_id)
            .bind(filter.search_pattern())
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Every registration matching `filter`, in export order.
    pub async fn list_for_export(
        pool: &PgPool,
        filter: &RegistrationFilter,
    ) -> Result<Vec<ExportRow>, sqlx::Error> {
        let query = format!(
            "SELECT c.sap_code, m.name AS model_name, r.imei, b.campaign_date
             {FROM_JOINED}
             {FILTER}
             ORDER BY b.campaign_date, c.sap_code, m.name, r.id"
        );
        sqlx::query_as::<_, ExportRow>(&query)
            .bind(filter.campaign_id)
            .bind(filter.search_pattern())
            .fetch_all(pool)
            .await
    }
}
