//! Service health handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub database: &'static str,
}

/// Liveness endpoint with a database reachability check
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_reachable = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    Json(health_payload(&state.config.environment, db_reachable))
}

fn health_payload(environment: &str, db_reachable: bool) -> HealthResponse {
    HealthResponse {
        service: "rootcause-advisory",
        status: if db_reachable { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: environment.to_string(),
        database: if db_reachable { "reachable" } else { "unreachable" },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_database_reports_ok() {
        let payload = health_payload("development", true);
        assert_eq!(payload.service, "rootcause-advisory");
        assert_eq!(payload.status, "ok");
        assert_eq!(payload.database, "reachable");
    }

    #[test]
    fn unreachable_database_degrades_without_failing() {
        let payload = health_payload("production", false);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.database, "unreachable");
        assert_eq!(payload.environment, "production");
    }
}
