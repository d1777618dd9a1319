//! Handlers for provisioning, inspecting and tearing down game servers.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use skyhost_core::error::CoreError;
use skyhost_core::reference;
use skyhost_core::types::{DbId, Timestamp};
use skyhost_db::models::server::ServerWithMap;
use skyhost_db::repositories::{ServerExtensionRepo, ServerRepo};
use skyhost_provision::{CreateServerRequest, ProvisionError, ProvisionedServer};

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::extract::ServerId;
use crate::state::AppState;

/// Body of `POST /api/servers`.
///
/// Field names follow the wire format game-server tooling already sends,
/// including the `presistent` spelling.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCreateRequest {
    /// `name:tag` of the map.
    pub map: String,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub compression_threshold: i32,
    #[serde(default, rename = "presistent", alias = "persistent")]
    pub persistent: bool,
    #[serde(default, rename = "forwarding_secret")]
    pub forwarding_secret: Option<String>,
    /// `name:tag` of each extension.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl From<ServerCreateRequest> for CreateServerRequest {
    fn from(req: ServerCreateRequest) -> Self {
        Self {
            map: req.map,
            terminal: req.terminal,
            brand: req.brand,
            compression_threshold: req.compression_threshold,
            persistent: req.persistent,
            forwarding_secret: req.forwarding_secret,
            extensions: req.extensions,
        }
    }
}

/// A server as reported to clients: the record, its map and extension
/// keys, and where players connect.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    pub id: DbId,
    pub terminal: bool,
    pub compression_threshold: i32,
    pub brand: String,
    pub persistent: bool,
    /// `name:tag` of the map.
    pub map: String,
    pub extensions: Vec<String>,
    pub host: String,
    pub port: u16,
    pub created_at: Timestamp,
}

impl ServerResponse {
    fn provisioned(created: ProvisionedServer, config: &ServerConfig) -> Self {
        let server = created.server;
        Self {
            id: server.id,
            terminal: server.terminal,
            compression_threshold: server.compression_threshold,
            brand: server.brand,
            persistent: server.persistent,
            map: created.map,
            extensions: created.extensions,
            host: config.advertised_host.clone(),
            port: config.advertised_port,
            created_at: server.created_at,
        }
    }

    fn stored(server: ServerWithMap, extensions: Vec<String>, config: &ServerConfig) -> Self {
        Self {
            map: server.map_key(),
            id: server.id,
            terminal: server.terminal,
            compression_threshold: server.compression_threshold,
            brand: server.brand,
            persistent: server.persistent,
            extensions,
            host: config.advertised_host.clone(),
            port: config.advertised_port,
            created_at: server.created_at,
        }
    }
}

/// Row of `GET /api/servers`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    pub id: DbId,
    pub terminal: bool,
    pub compression_threshold: i32,
    pub brand: String,
    pub persistent: bool,
    pub map: String,
    pub created_at: Timestamp,
}

impl From<ServerWithMap> for ServerSummary {
    fn from(server: ServerWithMap) -> Self {
        Self {
            map: server.map_key(),
            id: server.id,
            terminal: server.terminal,
            compression_threshold: server.compression_threshold,
            brand: server.brand,
            persistent: server.persistent,
            created_at: server.created_at,
        }
    }
}

/// Run a workflow on its own task so a dropped request (client gone,
/// timeout layer fired) does not abandon it between two steps.
async fn detached<T, F>(workflow: F) -> AppResult<T>
where
    F: Future<Output = Result<T, ProvisionError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(workflow).await {
        Ok(result) => result.map_err(AppError::from),
        Err(e) => {
            tracing::error!(error = %e, "Provisioning task aborted");
            Err(AppError::Core(CoreError::Internal(e.to_string())))
        }
    }
}

/// GET /api/servers
pub async fn list_servers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let servers = ServerRepo::list_with_map(&state.pool).await?;
    let summaries: Vec<ServerSummary> = servers.into_iter().map(Into::into).collect();
    Ok(Json(summaries))
}

/// GET /api/server/{id}
pub async fn get_server(
    State(state): State<AppState>,
    ServerId(server_id): ServerId,
) -> AppResult<impl IntoResponse> {
    let server = ServerRepo::find_with_map(&state.pool, server_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Server",
                key: server_id.to_string(),
            })
        })?;

    let extensions = ServerExtensionRepo::list_for_server(&state.pool, server_id)
        .await?
        .into_iter()
        .map(|e| reference::summary(&e.name, &e.tag))
        .collect();

    Ok(Json(ServerResponse::stored(
        server,
        extensions,
        &state.config,
    )))
}

/// POST /api/servers
///
/// Provision a server: record, extension links, running container.
pub async fn create_server(
    State(state): State<AppState>,
    Json(input): Json<ServerCreateRequest>,
) -> AppResult<impl IntoResponse> {
    let request = CreateServerRequest::from(input);
    let orchestrator = Arc::clone(&state.orchestrator);
    let created = detached(async move { orchestrator.create_server(&request).await }).await?;

    tracing::info!(
        server_id = created.server.id,
        map = %created.map,
        container_id = %created.container_id,
        "Server created via API",
    );

    Ok((
        StatusCode::CREATED,
        Json(ServerResponse::provisioned(created, &state.config)),
    ))
}

/// DELETE /api/servers/{id}
///
/// Stop and remove the container, then delete the record. Responds with
/// the plain text `success`.
pub async fn delete_server(
    State(state): State<AppState>,
    ServerId(server_id): ServerId,
) -> AppResult<impl IntoResponse> {
    let orchestrator = Arc::clone(&state.orchestrator);
    detached(async move { orchestrator.delete_server(server_id).await }).await?;

    tracing::info!(server_id, "Server deleted via API");

    Ok("success")
}
