//! Map entity model and DTOs.

use serde::{Deserialize, Serialize};
use skyhost_core::reference;
use skyhost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `maps` table. The payload itself lives in the asset store.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Map {
    pub id: DbId,
    pub name: String,
    pub tag: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl Map {
    /// `name:tag` summary of this map.
    pub fn key(&self) -> String {
        reference::summary(&self.name, &self.tag)
    }
}

/// DTO for registering an uploaded map.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMap {
    pub name: String,
    pub tag: String,
    pub description: String,
}
