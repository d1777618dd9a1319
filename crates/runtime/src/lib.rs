//! Container runtime client.
//!
//! Defines the [`ContainerRuntime`] seam the provisioning workflows talk
//! to, and a Docker implementation of it backed by [`bollard`]. Naming and
//! network attachment are always supplied by the caller; the client never
//! discovers containers on its own.

pub mod docker;
pub mod error;
pub mod spec;

use std::time::Duration;

use async_trait::async_trait;

pub use docker::DockerRuntime;
pub use error::RuntimeError;
pub use spec::{ContainerSpec, ContainerState, ContainerSummary};

/// Grace period between the stop signal and forced termination.
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Operations the provisioning workflows need from a container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Create (but do not start) a container, returning its runtime id.
    async fn create(&self, spec: &ContainerSpec) -> Result<String, RuntimeError>;

    /// Start a created container.
    async fn start(&self, id: &str) -> Result<(), RuntimeError>;

    /// List containers; stopped ones are included when `include_stopped` is set.
    async fn list(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Ask a container to stop, killing it once `grace` has elapsed.
    async fn stop(&self, id: &str, grace: Duration) -> Result<(), RuntimeError>;

    /// Remove a stopped container.
    async fn remove(&self, id: &str) -> Result<(), RuntimeError>;

    /// Remove a container whatever its state, killing it if needed.
    async fn force_remove(&self, id: &str) -> Result<(), RuntimeError>;
}
