#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
