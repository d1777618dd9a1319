use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency below is healthy, else `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the asset root is a readable directory.
    pub assets_healthy: bool,
}

/// GET /health -- service, database and asset store health. Not gated by
/// the API key so orchestration tooling can poll it.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = skyhost_db::health_check(&state.pool).await.is_ok();
    let assets_healthy = tokio::fs::metadata(state.assets.root())
        .await
        .is_ok_and(|m| m.is_dir());

    let status = if db_healthy && assets_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        assets_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
