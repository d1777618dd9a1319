//! In-memory fakes for the resource store and container runtime.
//!
//! Both fakes record what happened so tests can assert on call order and
//! on the state left behind after a failed workflow.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use skyhost_core::reference::CompositeKey;
use skyhost_core::types::DbId;
use skyhost_db::models::extension::Extension;
use skyhost_db::models::map::Map;
use skyhost_db::models::server::{CreateServer, Server};
use skyhost_db::models::server_extension::{CreateServerExtension, ServerExtension};
use skyhost_provision::{LaunchFailurePolicy, Orchestrator, ProvisionConfig, ResourceStore};
use skyhost_runtime::{
    ContainerRuntime, ContainerSpec, ContainerState, ContainerSummary, RuntimeError,
};

// ---------------------------------------------------------------------------
// Resource store
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct StoreState {
    next_id: DbId,
    pub maps: Vec<Map>,
    pub extensions: Vec<Extension>,
    pub servers: Vec<Server>,
    pub links: Vec<ServerExtension>,
    /// Fail the n-th (0-based) link insert.
    pub fail_link_at: Option<usize>,
    pub fail_create_server: bool,
    pub fail_delete_server: bool,
    link_attempts: usize,
    server_inserts: usize,
}

impl StoreState {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default, Clone)]
pub struct FakeStore {
    pub state: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    pub fn add_map(&self, name: &str, tag: &str) -> Map {
        let mut state = self.state.lock().unwrap();
        let map = Map {
            id: state.next_id(),
            name: name.into(),
            tag: tag.into(),
            description: String::new(),
            created_at: Utc::now(),
        };
        state.maps.push(map.clone());
        map
    }

    pub fn add_extension(&self, name: &str, tag: &str) -> Extension {
        let mut state = self.state.lock().unwrap();
        let extension = Extension {
            id: state.next_id(),
            name: name.into(),
            tag: tag.into(),
            description: String::new(),
            created_at: Utc::now(),
        };
        state.extensions.push(extension.clone());
        extension
    }

    pub fn server_count(&self) -> usize {
        self.state.lock().unwrap().servers.len()
    }

    /// Server inserts attempted, including failed ones.
    pub fn server_inserts(&self) -> usize {
        self.state.lock().unwrap().server_inserts
    }

    pub fn link_count(&self) -> usize {
        self.state.lock().unwrap().links.len()
    }

    pub fn links_for(&self, server_id: DbId) -> Vec<ServerExtension> {
        self.state
            .lock()
            .unwrap()
            .links
            .iter()
            .filter(|l| l.server_id == server_id)
            .cloned()
            .collect()
    }

    pub fn has_server(&self, server_id: DbId) -> bool {
        self.state
            .lock()
            .unwrap()
            .servers
            .iter()
            .any(|s| s.id == server_id)
    }

    pub fn insert_server(&self, map_id: DbId) -> Server {
        let mut state = self.state.lock().unwrap();
        let server = Server {
            id: state.next_id(),
            map_id,
            terminal: false,
            brand: String::new(),
            compression_threshold: 256,
            persistent: false,
            created_at: Utc::now(),
        };
        state.servers.push(server.clone());
        server
    }
}

fn injected(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("injected {what} failure"))
}

#[async_trait]
impl ResourceStore for FakeStore {
    async fn find_map(&self, key: &CompositeKey) -> Result<Option<Map>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .maps
            .iter()
            .find(|m| m.name == key.name && m.tag == key.tag)
            .cloned())
    }

    async fn find_extension(&self, key: &CompositeKey) -> Result<Option<Extension>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .extensions
            .iter()
            .find(|e| e.name == key.name && e.tag == key.tag)
            .cloned())
    }

    async fn create_server(&self, input: &CreateServer) -> Result<Server, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        state.server_inserts += 1;
        if state.fail_create_server {
            return Err(injected("server insert"));
        }
        let server = Server {
            id: state.next_id(),
            map_id: input.map_id,
            terminal: input.terminal,
            brand: input.brand.clone(),
            compression_threshold: input.compression_threshold,
            persistent: input.persistent,
            created_at: Utc::now(),
        };
        state.servers.push(server.clone());
        Ok(server)
    }

    async fn link_extension(
        &self,
        input: &CreateServerExtension,
    ) -> Result<ServerExtension, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let attempt = state.link_attempts;
        state.link_attempts += 1;
        if state.fail_link_at == Some(attempt) {
            return Err(injected("link insert"));
        }
        let link = ServerExtension {
            id: state.next_id(),
            server_id: input.server_id,
            extension_id: input.extension_id,
            position: input.position,
            created_at: Utc::now(),
        };
        state.links.push(link.clone());
        Ok(link)
    }

    async fn delete_server_links(&self, server_id: DbId) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let before = state.links.len();
        state.links.retain(|l| l.server_id != server_id);
        Ok((before - state.links.len()) as u64)
    }

    async fn delete_server(&self, server_id: DbId) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        if state.fail_delete_server {
            return Err(injected("server delete"));
        }
        let before = state.servers.len();
        state.servers.retain(|s| s.id != server_id);
        // Mirrors the ON DELETE CASCADE on server_extensions.
        state.links.retain(|l| l.server_id != server_id);
        Ok((before - state.servers.len()) as u64)
    }
}

// ---------------------------------------------------------------------------
// Container runtime
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCall {
    Create(ContainerSpec),
    Start(String),
    List(bool),
    Stop(String, Duration),
    Remove(String),
    ForceRemove(String),
}

#[derive(Default)]
pub struct RuntimeState {
    next_id: u64,
    pub containers: Vec<ContainerSummary>,
    pub calls: Vec<RuntimeCall>,
    pub fail_create: bool,
    pub fail_start: bool,
    pub fail_list: bool,
    pub fail_stop: bool,
    pub fail_remove: bool,
    pub fail_force_remove: bool,
}

#[derive(Default, Clone)]
pub struct FakeRuntime {
    pub state: Arc<Mutex<RuntimeState>>,
}

impl FakeRuntime {
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn containers(&self) -> Vec<ContainerSummary> {
        self.state.lock().unwrap().containers.clone()
    }

    pub fn created_specs(&self) -> Vec<ContainerSpec> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RuntimeCall::Create(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// Seed a container as if it had been launched earlier.
    pub fn add_container(&self, name: &str, state: ContainerState) -> String {
        let mut inner = self.state.lock().unwrap();
        inner.next_id += 1;
        let id = format!("c{}", inner.next_id);
        inner.containers.push(ContainerSummary {
            id: id.clone(),
            name: name.into(),
            state,
        });
        id
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::Create(spec.clone()));
        if state.fail_create {
            return Err(RuntimeError::daemon(500, "create refused"));
        }
        state.next_id += 1;
        let id = format!("c{}", state.next_id);
        state.containers.push(ContainerSummary {
            id: id.clone(),
            name: spec.name.clone(),
            state: ContainerState::Created,
        });
        Ok(id)
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::Start(id.into()));
        if state.fail_start {
            return Err(RuntimeError::daemon(500, "start refused"));
        }
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RuntimeError::NotFound(id.into()))?;
        container.state = ContainerState::Running;
        Ok(())
    }

    async fn list(&self, include_stopped: bool) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::List(include_stopped));
        if state.fail_list {
            return Err(RuntimeError::daemon(500, "list refused"));
        }
        Ok(state
            .containers
            .iter()
            .filter(|c| include_stopped || c.is_running())
            .map(|c| ContainerSummary {
                // Docker reports names with a leading slash.
                name: format!("/{}", c.name),
                ..c.clone()
            })
            .collect())
    }

    async fn stop(&self, id: &str, grace: Duration) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::Stop(id.into(), grace));
        if state.fail_stop {
            return Err(RuntimeError::daemon(500, "stop refused"));
        }
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RuntimeError::NotFound(id.into()))?;
        container.state = ContainerState::Exited;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::Remove(id.into()));
        if state.fail_remove {
            return Err(RuntimeError::daemon(500, "remove refused"));
        }
        let container = state
            .containers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| RuntimeError::NotFound(id.into()))?;
        if container.is_running() {
            return Err(RuntimeError::daemon(409, "container is running"));
        }
        state.containers.retain(|c| c.id != id);
        Ok(())
    }

    async fn force_remove(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RuntimeCall::ForceRemove(id.into()));
        if state.fail_force_remove {
            return Err(RuntimeError::daemon(500, "remove refused"));
        }
        let before = state.containers.len();
        state.containers.retain(|c| c.id != id);
        if before == state.containers.len() {
            return Err(RuntimeError::NotFound(id.into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub fn test_config(policy: LaunchFailurePolicy) -> ProvisionConfig {
    ProvisionConfig {
        server_key: "shared-key".into(),
        self_url: "http://content-api:8080".into(),
        image: "skystom".into(),
        network: "mc-servers".into(),
        launch_failure: policy,
    }
}

pub fn orchestrator(store: &FakeStore, runtime: &FakeRuntime) -> Orchestrator {
    orchestrator_with(store, runtime, LaunchFailurePolicy::Rollback)
}

pub fn orchestrator_with(
    store: &FakeStore,
    runtime: &FakeRuntime,
    policy: LaunchFailurePolicy,
) -> Orchestrator {
    Orchestrator::new(
        Arc::new(store.clone()),
        Arc::new(runtime.clone()),
        test_config(policy),
    )
}
