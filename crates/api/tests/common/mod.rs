#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use skyhost_core::assets::LocalAssetStore;
use skyhost_provision::{LaunchFailurePolicy, Orchestrator, PgResourceStore};
use skyhost_runtime::{
    ContainerRuntime, ContainerSpec, ContainerState, ContainerSummary, RuntimeError,
};
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use skyhost_api::config::ServerConfig;
use skyhost_api::router::build_app_router;
use skyhost_api::state::AppState;

pub const API_KEY: &str = "test-key";

/// `/api<path>?key=<API_KEY>`.
pub fn api(path: &str) -> String {
    format!("/api{path}?key={API_KEY}")
}

// ---------------------------------------------------------------------------
// Fake container runtime
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RuntimeState {
    next_id: u64,
    pub containers: Vec<ContainerSummary>,
    pub specs: Vec<ContainerSpec>,
    pub fail_create: bool,
    pub fail_stop: bool,
}

/// In-memory runtime; containers are running as soon as they start.
#[derive(Default, Clone)]
pub struct FakeRuntime {
    pub state: Arc<Mutex<RuntimeState>>,
}

impl FakeRuntime {
    pub fn containers(&self) -> Vec<ContainerSummary> {
        self.state.lock().unwrap().containers.clone()
    }

    pub fn specs(&self) -> Vec<ContainerSpec> {
        self.state.lock().unwrap().specs.clone()
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn create(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(RuntimeError::daemon(500, "create refused"));
        }
        state.next_id += 1;
        let id = format!("c{}", state.next_id);
        state.specs.push(spec.clone());
        state.containers.push(ContainerSummary {
            id: id.clone(),
            name: spec.name.clone(),
            state: ContainerState::Created,
        });
        Ok(id)
    }

    async fn start(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        let container = state
            .containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RuntimeError::NotFound(id.into()))?;
        container.state = ContainerState::Running;
        Ok(())
    }

    async fn list(&self, _include_stopped: bool) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .containers
            .iter()
            .map(|c| ContainerSummary {
                name: format!("/{}", c.name),
                ..c.clone()
            })
            .collect())
    }

    async fn stop(&self, id: &str, _grace: Duration) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_stop {
            return Err(RuntimeError::daemon(500, "stop refused"));
        }
        if let Some(container) = state.containers.iter_mut().find(|c| c.id == id) {
            container.state = ContainerState::Exited;
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().unwrap();
        let before = state.containers.len();
        state.containers.retain(|c| c.id != id);
        if before == state.containers.len() {
            return Err(RuntimeError::NotFound(id.into()));
        }
        Ok(())
    }

    async fn force_remove(&self, id: &str) -> Result<(), RuntimeError> {
        self.remove(id).await
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` rooted at `data_dir`.
pub fn test_config(data_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        max_body_bytes: 16 * 1024 * 1024,
        api_key: API_KEY.to_string(),
        self_url: "http://content-api:8080".to_string(),
        data_dir,
        server_image: "skystom".to_string(),
        server_network: "mc-servers".to_string(),
        advertised_host: "0.0.0.0".to_string(),
        advertised_port: 25565,
        launch_failure: LaunchFailurePolicy::Rollback,
    }
}

/// A database pool, a fake runtime and a scratch asset directory shared by
/// every router built from it.
pub struct TestContext {
    pub pool: PgPool,
    pub runtime: FakeRuntime,
    pub data_dir: TempDir,
}

impl TestContext {
    pub async fn new(pool: PgPool) -> Self {
        let data_dir = tempfile::tempdir().unwrap();
        LocalAssetStore::new(data_dir.path())
            .ensure_layout()
            .await
            .unwrap();
        Self {
            pool,
            runtime: FakeRuntime::default(),
            data_dir,
        }
    }

    /// Build the full application router with the production middleware
    /// stack.
    pub fn app(&self) -> Router {
        let config = test_config(self.data_dir.path().to_path_buf());
        let orchestrator = Orchestrator::new(
            Arc::new(PgResourceStore::new(self.pool.clone())),
            Arc::new(self.runtime.clone()),
            config.provision_config(),
        );

        let state = AppState {
            pool: self.pool.clone(),
            config: Arc::new(config.clone()),
            orchestrator: Arc::new(orchestrator),
            assets: Arc::new(LocalAssetStore::new(config.data_dir.clone())),
        };

        build_app_router(state, &config)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(json.to_string())).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Upload a map or extension (`kind` is `maps` or `extensions`).
pub async fn upload(
    ctx: &TestContext,
    kind: &str,
    name: &str,
    tag: &str,
    payload: &[u8],
) -> Response<Body> {
    use base64::Engine as _;

    let data = base64::engine::general_purpose::STANDARD.encode(payload);
    post_json(
        ctx.app(),
        &api(&format!("/{kind}")),
        serde_json::json!({
            "name": name,
            "tag": tag,
            "description": format!("{name} {tag}"),
            "data": data,
        }),
    )
    .await
}
