use std::sync::Arc;

use skyhost_core::assets::LocalAssetStore;
use skyhost_provision::Orchestrator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: skyhost_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Create/delete workflows for game servers.
    pub orchestrator: Arc<Orchestrator>,
    /// Map and extension payload storage.
    pub assets: Arc<LocalAssetStore>,
}
