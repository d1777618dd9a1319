//! Server entity model and DTOs.

use serde::{Deserialize, Serialize};
use skyhost_core::reference;
use skyhost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `servers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Server {
    pub id: DbId,
    pub map_id: DbId,
    pub terminal: bool,
    pub brand: String,
    pub compression_threshold: i32,
    pub persistent: bool,
    pub created_at: Timestamp,
}

/// A server joined with the name and tag of its map.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerWithMap {
    pub id: DbId,
    pub map_id: DbId,
    pub terminal: bool,
    pub brand: String,
    pub compression_threshold: i32,
    pub persistent: bool,
    pub created_at: Timestamp,
    pub map_name: String,
    pub map_tag: String,
}

impl ServerWithMap {
    /// `name:tag` summary of the owning map.
    pub fn map_key(&self) -> String {
        reference::summary(&self.map_name, &self.map_tag)
    }
}

/// DTO for inserting a server. Only the provisioning orchestrator creates these.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateServer {
    pub map_id: DbId,
    pub terminal: bool,
    pub brand: String,
    pub compression_threshold: i32,
    pub persistent: bool,
}
