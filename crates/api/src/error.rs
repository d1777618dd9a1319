use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use skyhost_core::assets::AssetError;
use skyhost_core::error::CoreError;
use skyhost_provision::{ErrorKind, ProvisionError};

/// Application-level error type for HTTP handlers.
///
/// Wraps domain, store, asset and provisioning errors and implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `skyhost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A failed create or delete workflow.
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// The asset store could not serve or persist a payload.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Provisioning ---
            AppError::Provision(err) => classify_provision_error(err),

            // --- Asset store ---
            AppError::Asset(AssetError::NotFound(path)) => {
                tracing::warn!(path = %path.display(), "Asset payload missing on disk");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Asset payload not found".to_string(),
                )
            }
            AppError::Asset(AssetError::Io(err)) => {
                tracing::error!(error = %err, "Asset store error");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "Asset storage is unavailable".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

/// Classify a workflow error into an HTTP status, error code, and message.
///
/// - `InvalidReference` maps to 400, `NotFound` to 404.
/// - `Upstream` maps to 502; the collaborator error is logged, not echoed.
/// - `ProvisionFailed` takes 404 when a referenced map or extension was
///   missing and 500 otherwise, always with code `PROVISION_FAILED`.
fn classify_provision_error(err: &ProvisionError) -> (StatusCode, &'static str, String) {
    match err.kind() {
        ErrorKind::InvalidReference => {
            (StatusCode::BAD_REQUEST, "INVALID_REFERENCE", err.to_string())
        }
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        ErrorKind::Upstream => {
            tracing::error!(error = %err, "Upstream call failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "A backing service call failed; inspect state before retrying".to_string(),
            )
        }
        ErrorKind::ProvisionFailed => {
            let root = err.root_cause();
            let status = match root.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ => {
                    tracing::error!(error = %err, "Provisioning failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                "Provisioning failed; inspect state before retrying".to_string()
            } else {
                err.to_string()
            };
            (status, "PROVISION_FAILED", message)
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
