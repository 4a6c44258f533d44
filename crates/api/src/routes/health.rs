//! Liveness endpoint, mounted at the root rather than under `/api`.
//!
//! The service keeps answering while PostgreSQL is down; the body then
//! reports `degraded` so load balancers can tell the two apart.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    /// Result of a `SELECT 1` against the pool.
    pub db_healthy: bool,
}

impl HealthResponse {
    pub fn from_db_check(db_healthy: bool) -> Self {
        let status = if db_healthy {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match baja_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    Json(HealthResponse::from_db_check(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_database_reports_ok() {
        let body = serde_json::to_value(HealthResponse::from_db_check(true)).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["db_healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn unreachable_database_reports_degraded() {
        let response = HealthResponse::from_db_check(false);
        assert_eq!(response.status, HealthStatus::Degraded);
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["db_healthy"], false);
    }
}
