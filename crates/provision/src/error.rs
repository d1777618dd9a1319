use skyhost_core::reference::ReferenceError;
use skyhost_runtime::RuntimeError;

/// A collaborator call that failed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("resource store: {0}")]
    Store(#[from] sqlx::Error),

    #[error("container runtime: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Coarse classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidReference,
    NotFound,
    Upstream,
    ProvisionFailed,
}

/// Errors from the create and delete workflows.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error(transparent)]
    InvalidReference(#[from] ReferenceError),

    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Upstream call failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// The create workflow failed after committing something; compensation
    /// has been attempted. `cause` is the error that triggered it.
    #[error("Provisioning failed: {cause}")]
    ProvisionFailed {
        #[source]
        cause: Box<ProvisionError>,
    },
}

impl ProvisionError {
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub(crate) fn failed(cause: ProvisionError) -> Self {
        Self::ProvisionFailed {
            cause: Box::new(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidReference(_) => ErrorKind::InvalidReference,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::ProvisionFailed { .. } => ErrorKind::ProvisionFailed,
        }
    }

    /// The error that started it all, looking through `ProvisionFailed`.
    pub fn root_cause(&self) -> &ProvisionError {
        match self {
            Self::ProvisionFailed { cause } => cause.root_cause(),
            other => other,
        }
    }
}

impl From<sqlx::Error> for ProvisionError {
    fn from(err: sqlx::Error) -> Self {
        Self::Upstream(UpstreamError::Store(err))
    }
}

impl From<RuntimeError> for ProvisionError {
    fn from(err: RuntimeError) -> Self {
        Self::Upstream(UpstreamError::Runtime(err))
    }
}
