//! Create and delete workflows for game servers.

use std::sync::Arc;

use serde::Serialize;
use skyhost_core::launch::{launch_env, LaunchParams};
use skyhost_core::naming::{container_name, is_container_for};
use skyhost_core::reference::CompositeKey;
use skyhost_core::types::DbId;
use skyhost_db::models::server::{CreateServer, Server};
use skyhost_db::models::server_extension::CreateServerExtension;
use skyhost_runtime::{ContainerRuntime, ContainerSpec, RuntimeError, STOP_GRACE_PERIOD};

use crate::config::{LaunchFailurePolicy, ProvisionConfig};
use crate::error::ProvisionError;
use crate::store::ResourceStore;

/// Input of the create workflow.
#[derive(Debug, Clone)]
pub struct CreateServerRequest {
    /// `name:tag` of the map.
    pub map: String,
    pub terminal: bool,
    pub brand: String,
    pub compression_threshold: i32,
    pub persistent: bool,
    pub forwarding_secret: Option<String>,
    /// `name:tag` of each extension, linked in this order.
    pub extensions: Vec<String>,
}

/// Result of a successful create.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionedServer {
    pub server: Server,
    /// `name:tag` of the resolved map.
    pub map: String,
    /// `name:tag` of each linked extension, in request order.
    pub extensions: Vec<String>,
    pub container_id: String,
}

/// Runs the provisioning workflows against a resource store and a
/// container runtime.
///
/// Each call is one sequential flow; concurrent calls are not coordinated.
pub struct Orchestrator {
    store: Arc<dyn ResourceStore>,
    runtime: Arc<dyn ContainerRuntime>,
    config: ProvisionConfig,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ResourceStore>,
        runtime: Arc<dyn ContainerRuntime>,
        config: ProvisionConfig,
    ) -> Self {
        Self {
            store,
            runtime,
            config,
        }
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    /// Create a server record, link its extensions and launch its container.
    ///
    /// Not idempotent: every successful call yields a new server.
    pub async fn create_server(
        &self,
        request: &CreateServerRequest,
    ) -> Result<ProvisionedServer, ProvisionError> {
        let map_key = CompositeKey::parse(&request.map)?;
        let extension_keys = request
            .extensions
            .iter()
            .map(|raw| CompositeKey::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let map = self
            .store
            .find_map(&map_key)
            .await?
            .ok_or_else(|| ProvisionError::not_found("Map", map_key.to_string()))?;

        let server = self
            .store
            .create_server(&CreateServer {
                map_id: map.id,
                terminal: request.terminal,
                brand: request.brand.clone(),
                compression_threshold: request.compression_threshold,
                persistent: request.persistent,
            })
            .await?;
        tracing::info!(server_id = server.id, map = %map_key, "Server record created");

        let extensions = match self.link_extensions(server.id, &extension_keys).await {
            Ok(linked) => linked,
            Err(cause) => {
                tracing::warn!(
                    server_id = server.id,
                    error = %cause,
                    "Extension linking failed, rolling back server",
                );
                self.compensate(server.id, None).await;
                return Err(ProvisionError::failed(cause));
            }
        };

        let spec = self.container_spec(server.id, request);

        let container_id = match self.runtime.create(&spec).await {
            Ok(id) => id,
            Err(err) => return Err(self.launch_failed(server.id, None, err).await),
        };
        if let Err(err) = self.runtime.start(&container_id).await {
            return Err(self.launch_failed(server.id, Some(&container_id), err).await);
        }

        tracing::info!(
            server_id = server.id,
            container = %spec.name,
            container_id = %container_id,
            extensions = extensions.len(),
            "Server provisioned",
        );

        Ok(ProvisionedServer {
            server,
            map: map_key.to_string(),
            extensions,
            container_id,
        })
    }

    /// Stop and remove a server's container, then delete its record.
    ///
    /// The record is only deleted once the container is gone; links follow
    /// the record through the store's cascade rule.
    pub async fn delete_server(&self, server_id: DbId) -> Result<(), ProvisionError> {
        let name = container_name(server_id);

        let container = self
            .runtime
            .list(true)
            .await?
            .into_iter()
            .find(|c| is_container_for(&c.name, server_id))
            .ok_or_else(|| ProvisionError::not_found("Container", name.clone()))?;

        if container.is_running() {
            self.runtime
                .stop(&container.id, STOP_GRACE_PERIOD)
                .await
                .map_err(|e| absent_as_not_found(e, &name))?;
            tracing::debug!(server_id, container = %name, "Container stopped");
        }

        self.runtime
            .remove(&container.id)
            .await
            .map_err(|e| absent_as_not_found(e, &name))?;

        let deleted = self.store.delete_server(server_id).await?;
        if deleted == 0 {
            return Err(ProvisionError::not_found("Server", server_id.to_string()));
        }

        tracing::info!(server_id, container = %name, "Server deleted");
        Ok(())
    }

    /// Resolve and link each extension in order. Stops at the first failure.
    async fn link_extensions(
        &self,
        server_id: DbId,
        keys: &[CompositeKey],
    ) -> Result<Vec<String>, ProvisionError> {
        let mut linked = Vec::with_capacity(keys.len());

        for (position, key) in keys.iter().enumerate() {
            let extension = self
                .store
                .find_extension(key)
                .await?
                .ok_or_else(|| ProvisionError::not_found("Extension", key.to_string()))?;

            self.store
                .link_extension(&CreateServerExtension {
                    server_id,
                    extension_id: extension.id,
                    position: i32::try_from(position).unwrap_or(i32::MAX),
                })
                .await?;
            linked.push(key.to_string());
        }

        Ok(linked)
    }

    fn container_spec(&self, server_id: DbId, request: &CreateServerRequest) -> ContainerSpec {
        let env = launch_env(&LaunchParams {
            server_id,
            server_key: &self.config.server_key,
            self_url: &self.config.self_url,
            persistent: request.persistent,
            forwarding_secret: request.forwarding_secret.as_deref(),
        });

        ContainerSpec {
            name: container_name(server_id),
            image: self.config.image.clone(),
            hostname: server_id.to_string(),
            env,
            network: self.config.network.clone(),
            tty: true,
            open_stdin: true,
        }
    }

    async fn launch_failed(
        &self,
        server_id: DbId,
        container_id: Option<&str>,
        err: RuntimeError,
    ) -> ProvisionError {
        let cause = ProvisionError::from(err);

        match self.config.launch_failure {
            LaunchFailurePolicy::Rollback => {
                tracing::warn!(server_id, error = %cause, "Container launch failed, rolling back server");
                self.compensate(server_id, container_id).await;
                ProvisionError::failed(cause)
            }
            LaunchFailurePolicy::KeepRecord => {
                tracing::error!(
                    server_id,
                    error = %cause,
                    "Container launch failed, server record kept without a container",
                );
                cause
            }
        }
    }

    /// Best-effort undo of a partial create. Failures are logged only; the
    /// caller reports the error that triggered the rollback.
    async fn compensate(&self, server_id: DbId, container_id: Option<&str>) {
        // Forced: a container that failed to start may be stuck in a state
        // a plain remove refuses.
        if let Some(id) = container_id {
            if let Err(e) = self.runtime.force_remove(id).await {
                tracing::error!(
                    server_id,
                    container_id = id,
                    container = %container_name(server_id),
                    error = %e,
                    "Rollback: container removal failed, container orphaned",
                );
            }
        }

        match self.store.delete_server_links(server_id).await {
            Ok(count) => tracing::debug!(server_id, count, "Rollback: extension links deleted"),
            Err(e) => {
                tracing::error!(server_id, error = %e, "Rollback: extension link deletion failed")
            }
        }

        match self.store.delete_server(server_id).await {
            Ok(_) => tracing::info!(server_id, "Rollback: server record deleted"),
            Err(e) => tracing::error!(server_id, error = %e, "Rollback: server deletion failed"),
        }
    }
}

/// A container that vanished between listing and acting on it was removed
/// by a concurrent delete.
fn absent_as_not_found(err: RuntimeError, name: &str) -> ProvisionError {
    match err {
        RuntimeError::NotFound(_) => ProvisionError::not_found("Container", name),
        other => other.into(),
    }
}
