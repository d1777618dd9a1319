//! Request extractors that reject through [`AppError`].

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use skyhost_core::types::DbId;

use crate::error::AppError;

/// Numeric `{id}` path segment of the server routes.
///
/// A segment that is not an integer answers 400 in the usual JSON error
/// body instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ServerId(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for ServerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state).await?;
        Ok(ServerId(id))
    }
}
