//! Docker implementation of [`ContainerRuntime`] using [`bollard`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, ListContainersOptions, NetworkingConfig,
    RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::models::EndpointSettings;
use bollard::Docker;

use crate::error::RuntimeError;
use crate::spec::{ContainerSpec, ContainerState, ContainerSummary};
use crate::ContainerRuntime;

/// Container runtime talking to a Docker daemon.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using the platform defaults (`DOCKER_HOST` or the local socket).
    pub fn connect_local() -> Result<Self, RuntimeError> {
        Ok(Self {
            docker: Docker::connect_with_local_defaults()?,
        })
    }

    /// Verify the daemon is reachable.
    pub async fn ping(&self) -> Result<(), RuntimeError> {
        self.docker.ping().await?;
        Ok(())
    }
}

/// Translate a [`ContainerSpec`] into the Docker create body.
fn container_config(spec: &ContainerSpec) -> Config<String> {
    let mut endpoints_config = HashMap::new();
    endpoints_config.insert(spec.network.clone(), EndpointSettings::default());

    Config {
        image: Some(spec.image.clone()),
        hostname: Some(spec.hostname.clone()),
        env: Some(spec.env.clone()),
        tty: Some(spec.tty),
        open_stdin: Some(spec.open_stdin),
        networking_config: Some(NetworkingConfig { endpoints_config }),
        ..Default::default()
    }
}

/// Convert a Docker listing entry, skipping entries without an id.
fn summarize(entry: bollard::models::ContainerSummary) -> Option<ContainerSummary> {
    let id = entry.id?;
    let name = entry
        .names
        .and_then(|names| names.into_iter().next())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_default();
    let state = entry
        .state
        .as_deref()
        .map(ContainerState::from_docker)
        .unwrap_or(ContainerState::Unknown);

    Some(ContainerSummary { id, name, state })
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
        let options = CreateContainerOptions {
            name: spec.name.clone(),
            ..Default::default()
        };
        let response = self
            .docker
            .create_container(Some(options), container_config(spec))
            .await?;

        for warning in &response.warnings {
            tracing::warn!(container = %spec.name, %warning, "Docker create warning");
        }
        tracing::debug!(container = %spec.name, id = %response.id, "Container created");
        Ok(response.id)
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await?;
        tracing::debug!(id, "Container started");
        Ok(())
    }

    async fn list(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let options = ListContainersOptions::<String> {
            all: include_stopped,
            ..Default::default()
        };
        let entries = self.docker.list_containers(Some(options)).await?;
        Ok(entries.into_iter().filter_map(summarize).collect())
    }

    async fn stop(&self, id: &str, grace: Duration) -> Result<(), RuntimeError> {
        let t = i64::try_from(grace.as_secs()).unwrap_or(i64::MAX);
        self.docker
            .stop_container(id, Some(StopContainerOptions { t }))
            .await?;
        tracing::debug!(id, grace_secs = t, "Container stopped");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        self.docker
            .remove_container(id, None::<RemoveContainerOptions>)
            .await?;
        tracing::debug!(id, "Container removed");
        Ok(())
    }

    async fn force_remove(&self, id: &str) -> Result<(), RuntimeError> {
        let options = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };
        self.docker.remove_container(id, Some(options)).await?;
        tracing::debug!(id, "Container force-removed");
        Ok(())
    }
}
