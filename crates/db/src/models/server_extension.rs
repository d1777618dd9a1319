//! Server <-> extension link model.

use serde::Serialize;
use skyhost_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `server_extensions` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServerExtension {
    pub id: DbId,
    pub server_id: DbId,
    pub extension_id: DbId,
    /// Index of the extension in the original create request.
    pub position: i32,
    pub created_at: Timestamp,
}

/// DTO for inserting a link.
#[derive(Debug, Clone, Copy)]
pub struct CreateServerExtension {
    pub server_id: DbId,
    pub extension_id: DbId,
    pub position: i32,
}

/// Name and tag of an extension linked to a server, in request order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LinkedExtension {
    pub extension_id: DbId,
    pub name: String,
    pub tag: String,
}
