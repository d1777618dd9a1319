//! Extension (plugin) entity model and DTOs.

use serde::{Deserialize, Serialize};
use skyhost_core::reference;
use skyhost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `extensions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Extension {
    pub id: DbId,
    pub name: String,
    pub tag: String,
    pub description: String,
    pub created_at: Timestamp,
}

impl Extension {
    pub fn key(&self) -> String {
        reference::summary(&self.name, &self.tag)
    }
}

/// DTO for registering an uploaded extension.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExtension {
    pub name: String,
    pub tag: String,
    pub description: String,
}
