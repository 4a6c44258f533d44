//! HTTP-level tests for the store-facing endpoints: client login, active
//! campaigns, and batch IMEI registration.

mod common;

use axum::http::StatusCode;
use baja_db::models::registration::RegistrationFilter;
use baja_db::repositories::{CampaignRepo, ClientRepo, DeviceModelRepo, RegistrationRepo};
use chrono::NaiveDate;
use common::{body_json, get, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Seed {
    campaign_id: i64,
    model_id: i64,
}

async fn seed(pool: &PgPool) -> Seed {
    ClientRepo::create(pool, "C1", "Tienda Centro").await.unwrap();
    let model = DeviceModelRepo::create(pool, "Galaxy A10").await.unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    let campaign = CampaignRepo::create(pool, "Marzo", date).await.unwrap();
    CampaignRepo::add_model(pool, campaign.id, model.id).await.unwrap();
    Seed {
        campaign_id: campaign.id,
        model_id: model.id,
    }
}

async fn stored_rows(pool: &PgPool) -> i64 {
    RegistrationRepo::count(pool, &RegistrationFilter::default())
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Client login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_login_normalizes_code(pool: PgPool) {
    seed(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/clientes/login",
        json!({ "codigo_sap": "  c1 " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["cliente"]["codigo_sap"], "C1");
    assert_eq!(body["cliente"]["nombre_negocio"], "Tienda Centro");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_login_unknown_and_blank(pool: PgPool) {
    seed(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/clientes/login",
        json!({ "codigo_sap": "ZZZ" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Cliente no encontrado");

    let response = post_json(
        common::build_test_app(pool),
        "/api/clientes/login",
        json!({ "codigo_sap": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Active campaigns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_campaigns_listing(pool: PgPool) {
    let s = seed(&pool).await;
    let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
    CampaignRepo::create(&pool, "Sin modelos", date).await.unwrap();
    let hidden = CampaignRepo::create(&pool, "Oculta", date).await.unwrap();
    CampaignRepo::add_model(&pool, hidden.id, s.model_id).await.unwrap();
    CampaignRepo::toggle_active(&pool, hidden.id).await.unwrap();

    let response = get(common::build_test_app(pool), "/api/bajas/activas").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let bajas = body["bajas"].as_array().unwrap();
    assert_eq!(bajas.len(), 1);
    assert_eq!(bajas[0]["id"], s.campaign_id);
    assert_eq!(bajas[0]["nombre_baja"], "Marzo");
    assert_eq!(bajas[0]["fecha_baja"], "2026-03-01");
    assert_eq!(bajas[0]["modelos"][0]["nombre_modelo"], "Galaxy A10");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_single_imei_and_resubmit(pool: PgPool) {
    let s = seed(&pool).await;
    let payload = json!({
        "cliente_sap": "C1",
        "baja_id": s.campaign_id,
        "registros": [{ "modelo_id": s.model_id, "imei": "123456789012345" }],
    });

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/imeis/registrar",
        payload.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "1 IMEIs registrados.");
    assert_eq!(body["inserted"], 1);

    // The ledger does not deduplicate.
    let response =
        post_json(common::build_test_app(pool.clone()), "/api/imeis/registrar", payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(stored_rows(&pool).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_bad_input(pool: PgPool) {
    let s = seed(&pool).await;
    let bad_payloads = [
        // IMEI with 14 digits.
        json!({
            "cliente_sap": "C1",
            "baja_id": s.campaign_id,
            "registros": [{ "modelo_id": s.model_id, "imei": "12345678901234" }],
        }),
        // Letters in the IMEI.
        json!({
            "cliente_sap": "C1",
            "baja_id": s.campaign_id,
            "registros": [{ "modelo_id": s.model_id, "imei": "12345678901234A" }],
        }),
        // Missing campaign.
        json!({
            "cliente_sap": "C1",
            "registros": [{ "modelo_id": s.model_id, "imei": "123456789012345" }],
        }),
        // Blank client.
        json!({
            "cliente_sap": " ",
            "baja_id": s.campaign_id,
            "registros": [{ "modelo_id": s.model_id, "imei": "123456789012345" }],
        }),
        // Empty list.
        json!({ "cliente_sap": "C1", "baja_id": s.campaign_id, "registros": [] }),
    ];

    for payload in bad_payloads {
        let response = post_json(
            common::build_test_app(pool.clone()),
            "/api/imeis/registrar",
            payload.clone(),
        )
        .await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "payload should be rejected: {payload}"
        );
        assert_eq!(body_json(response).await["ok"], false);
    }

    assert_eq!(stored_rows(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_store_failure_is_generic_and_atomic(pool: PgPool) {
    let s = seed(&pool).await;
    let payload = json!({
        "cliente_sap": "C1",
        "baja_id": s.campaign_id,
        "registros": [
            { "modelo_id": s.model_id, "imei": "111111111111111" },
            { "modelo_id": 999999, "imei": "222222222222222" },
        ],
    });

    let response =
        post_json(common::build_test_app(pool.clone()), "/api/imeis/registrar", payload).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "An internal error occurred");
    assert!(!body.to_string().contains("fk_"), "constraint names must not leak");

    assert_eq!(stored_rows(&pool).await, 0);
}
