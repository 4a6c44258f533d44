//! Integration tests for the registration ledger and the referential rules
//! around it.
//!
//! Exercises the repository layer against a real database:
//! - Batch atomicity (all rows or none)
//! - No server-side deduplication
//! - Delete blocking for models, campaigns and clients
//! - Shared filter predicate for count, page and export

use assert_matches::assert_matches;
use baja_core::pagination::PageRequest;
use baja_core::registration::{RegisterBatch, RegistrationEntry};
use baja_db::models::registration::RegistrationFilter;
use baja_db::repositories::{CampaignRepo, ClientRepo, DeviceModelRepo, RegistrationRepo};
use chrono::NaiveDate;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    campaign_id: i64,
    model_id: i64,
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn imei(n: u64) -> String {
    format!("{n:015}")
}

async fn setup(pool: &PgPool) -> Fixture {
    ClientRepo::create(pool, "C1", "Tienda Centro").await.unwrap();
    let model = DeviceModelRepo::create(pool, "Galaxy A10").await.unwrap();
    let campaign = CampaignRepo::create(pool, "Marzo", day(1)).await.unwrap();
    CampaignRepo::add_model(pool, campaign.id, model.id).await.unwrap();
    Fixture {
        campaign_id: campaign.id,
        model_id: model.id,
    }
}

fn batch(sap: &str, campaign_id: i64, entries: &[(i64, String)]) -> RegisterBatch {
    RegisterBatch {
        client_sap: sap.to_string(),
        campaign_id,
        entries: entries
            .iter()
            .map(|(model_id, imei)| RegistrationEntry {
                model_id: *model_id,
                imei: imei.clone(),
            })
            .collect(),
    }
}

fn by_campaign(campaign_id: i64) -> RegistrationFilter {
    RegistrationFilter {
        campaign_id: Some(campaign_id),
        search: None,
    }
}

// ---------------------------------------------------------------------------
// Batch registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_inserts_every_row(pool: PgPool) {
    let fx = setup(&pool).await;
    let input = batch(
        "C1",
        fx.campaign_id,
        &[(fx.model_id, imei(1)), (fx.model_id, imei(2)), (fx.model_id, imei(3))],
    );

    let inserted = RegistrationRepo::register_batch(&pool, &input).await.unwrap();
    assert_eq!(inserted, 3);

    let count = RegistrationRepo::count(&pool, &by_campaign(fx.campaign_id)).await.unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_with_bad_model_rolls_back_everything(pool: PgPool) {
    let fx = setup(&pool).await;
    let input = batch(
        "C1",
        fx.campaign_id,
        &[(fx.model_id, imei(1)), (999_999, imei(2)), (fx.model_id, imei(3))],
    );

    let result = RegistrationRepo::register_batch(&pool, &input).await;
    assert!(result.is_err(), "unknown model must fail the batch");

    let count = RegistrationRepo::count(&pool, &RegistrationFilter::default()).await.unwrap();
    assert_eq!(count, 0, "no partial rows may persist");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_batch_with_unknown_client_rolls_back(pool: PgPool) {
    let fx = setup(&pool).await;
    let input = batch("NOPE", fx.campaign_id, &[(fx.model_id, imei(1))]);

    let err = RegistrationRepo::register_batch(&pool, &input).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"));

    let count = RegistrationRepo::count(&pool, &RegistrationFilter::default()).await.unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resubmitting_creates_duplicate_rows(pool: PgPool) {
    let fx = setup(&pool).await;
    let input = batch("C1", fx.campaign_id, &[(fx.model_id, imei(42))]);

    RegistrationRepo::register_batch(&pool, &input).await.unwrap();
    RegistrationRepo::register_batch(&pool, &input).await.unwrap();

    let filter = RegistrationFilter {
        campaign_id: None,
        search: Some(imei(42)),
    };
    assert_eq!(RegistrationRepo::count(&pool, &filter).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Referential rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_linked_model_cannot_be_deleted(pool: PgPool) {
    let fx = setup(&pool).await;

    let err = DeviceModelRepo::delete(&pool, fx.model_id).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("fk_campaign_models_model")
    );
    assert!(DeviceModelRepo::find_by_id(&pool, fx.model_id).await.unwrap().is_some());

    // Once unlinked the model can go.
    assert!(CampaignRepo::remove_model(&pool, fx.campaign_id, fx.model_id).await.unwrap());
    assert!(DeviceModelRepo::delete(&pool, fx.model_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_campaign_delete_blocked_by_registrations(pool: PgPool) {
    let fx = setup(&pool).await;
    let empty = CampaignRepo::create(&pool, "Vacía", day(2)).await.unwrap();
    CampaignRepo::add_model(&pool, empty.id, fx.model_id).await.unwrap();

    RegistrationRepo::register_batch(&pool, &batch("C1", fx.campaign_id, &[(fx.model_id, imei(1))]))
        .await
        .unwrap();

    let err = CampaignRepo::delete(&pool, fx.campaign_id).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("fk_registered_imeis_campaign")
    );

    // A campaign without registrations deletes, taking its links with it.
    assert!(CampaignRepo::delete(&pool, empty.id).await.unwrap());
    assert!(CampaignRepo::models_for(&pool, empty.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_registration_check(pool: PgPool) {
    let fx = setup(&pool).await;
    let other = ClientRepo::create(&pool, "C2", "Tienda Norte").await.unwrap();
    let c1 = ClientRepo::find_by_sap_code(&pool, "C1").await.unwrap().unwrap();

    RegistrationRepo::register_batch(&pool, &batch("C1", fx.campaign_id, &[(fx.model_id, imei(1))]))
        .await
        .unwrap();

    assert!(ClientRepo::has_registrations(&pool, c1.id).await.unwrap());
    assert!(!ClientRepo::has_registrations(&pool, other.id).await.unwrap());
    assert!(ClientRepo::delete(&pool, other.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_link_and_sap_code_are_unique_violations(pool: PgPool) {
    let fx = setup(&pool).await;

    let err = CampaignRepo::add_model(&pool, fx.campaign_id, fx.model_id).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_campaign_models")
    );

    let err = ClientRepo::create(&pool, "C1", "Otra").await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_clients_sap_code")
    );
}

// ---------------------------------------------------------------------------
// Campaign listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_campaigns_need_models_and_flag(pool: PgPool) {
    let fx = setup(&pool).await;
    let no_models = CampaignRepo::create(&pool, "Sin modelos", day(5)).await.unwrap();
    let inactive = CampaignRepo::create(&pool, "Inactiva", day(6)).await.unwrap();
    CampaignRepo::add_model(&pool, inactive.id, fx.model_id).await.unwrap();
    CampaignRepo::toggle_active(&pool, inactive.id).await.unwrap();

    let active = CampaignRepo::list_active(&pool).await.unwrap();
    let ids: Vec<i64> = active.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![fx.campaign_id]);
    assert_eq!(active[0].models[0].name, "Galaxy A10");

    let all = CampaignRepo::list_with_models(&pool).await.unwrap();
    assert_eq!(all.len(), 3);
    // Newest date first.
    assert_eq!(all[0].campaign.id, inactive.id);
    assert!(!all[0].campaign.is_active);
    let empty = all.iter().find(|c| c.campaign.id == no_models.id).unwrap();
    assert!(empty.models.is_empty());
}

// ---------------------------------------------------------------------------
// Filtering and pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filters_combine_and_count_matches_pages(pool: PgPool) {
    let fx = setup(&pool).await;
    ClientRepo::create(&pool, "ZX9", "Kiosko Sur").await.unwrap();
    let other = CampaignRepo::create(&pool, "Abril", day(20)).await.unwrap();
    CampaignRepo::add_model(&pool, other.id, fx.model_id).await.unwrap();

    let entries: Vec<(i64, String)> = (1..=7).map(|n| (fx.model_id, imei(n))).collect();
    RegistrationRepo::register_batch(&pool, &batch("C1", fx.campaign_id, &entries))
        .await
        .unwrap();
    RegistrationRepo::register_batch(&pool, &batch("ZX9", fx.campaign_id, &[(fx.model_id, imei(100))]))
        .await
        .unwrap();
    RegistrationRepo::register_batch(&pool, &batch("ZX9", other.id, &[(fx.model_id, imei(101))]))
        .await
        .unwrap();

    // Case-insensitive match on business name, restricted to one campaign.
    let filter = RegistrationFilter {
        campaign_id: Some(fx.campaign_id),
        search: Some("kiosko".into()),
    };
    assert_eq!(RegistrationRepo::count(&pool, &filter).await.unwrap(), 1);
    let rows = RegistrationRepo::list_page(&pool, &filter, PageRequest::new(None, None))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].imei, imei(100));
    assert_eq!(rows[0].sap_code, "ZX9");

    // Pages of 3 over the 7 rows of C1.
    let filter = RegistrationFilter {
        campaign_id: None,
        search: Some("c1".into()),
    };
    assert_eq!(RegistrationRepo::count(&pool, &filter).await.unwrap(), 7);
    let last = RegistrationRepo::list_page(&pool, &filter, PageRequest::new(Some(3), Some(3)))
        .await
        .unwrap();
    assert_eq!(last.len(), 1);

    let export = RegistrationRepo::list_for_export(&pool, &filter).await.unwrap();
    assert_eq!(export.len(), 7);
    assert!(export.iter().all(|r| r.sap_code == "C1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_wildcards_are_literal(pool: PgPool) {
    let fx = setup(&pool).await;
    ClientRepo::create(&pool, "C_2", "100% Móvil").await.unwrap();
    RegistrationRepo::register_batch(&pool, &batch("C_2", fx.campaign_id, &[(fx.model_id, imei(5))]))
        .await
        .unwrap();
    RegistrationRepo::register_batch(&pool, &batch("C1", fx.campaign_id, &[(fx.model_id, imei(6))]))
        .await
        .unwrap();

    let percent = RegistrationFilter {
        campaign_id: None,
        search: Some("%".into()),
    };
    assert_eq!(RegistrationRepo::count(&pool, &percent).await.unwrap(), 1);

    let underscore = RegistrationFilter {
        campaign_id: None,
        search: Some("c_".into()),
    };
    assert_eq!(RegistrationRepo::count(&pool, &underscore).await.unwrap(), 1);

    let blank = RegistrationFilter {
        campaign_id: None,
        search: Some("   ".into()),
    };
    assert_eq!(RegistrationRepo::count(&pool, &blank).await.unwrap(), 2);
}
