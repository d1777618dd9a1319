//! Shared-key gate for the `/api` routes.

use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::state::AppState;

/// Body returned with the 403; game-server clients match on it.
pub const REJECTION_MESSAGE: &str = "incorrect api key!";

#[derive(Debug, Deserialize)]
pub struct ApiKeyQuery {
    pub key: Option<String>,
}

/// Pass the request on only when `?key=` equals the configured API key.
///
/// Mount with `axum::middleware::from_fn_with_state`.
pub async fn require_api_key(
    State(state): State<AppState>,
    Query(query): Query<ApiKeyQuery>,
    request: Request,
    next: Next,
) -> Response {
    if query.key.as_deref() != Some(state.config.api_key.as_str()) {
        tracing::warn!(path = %request.uri().path(), "Rejected request with wrong API key");
        return (StatusCode::FORBIDDEN, REJECTION_MESSAGE).into_response();
    }

    next.run(request).await
}
