/// Errors from the container runtime layer.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The Docker API call failed (transport, daemon or request error).
    #[error("Docker API error: {0}")]
    Api(bollard::errors::Error),

    /// The daemon answered 404 for the addressed container.
    #[error("Container not found: {0}")]
    NotFound(String),
}

impl RuntimeError {
    /// Build an error carrying a daemon status code and message.
    pub fn daemon(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api(bollard::errors::Error::DockerResponseServerError {
            status_code,
            message: message.into(),
        })
    }
}

impl From<bollard::errors::Error> for RuntimeError {
    fn from(err: bollard::errors::Error) -> Self {
        match err {
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404,
                message,
            } => Self::NotFound(message),
            other => Self::Api(other),
        }
    }
}
