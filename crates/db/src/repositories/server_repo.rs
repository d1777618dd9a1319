//! Repository for the `servers` table.

use skyhost_core::types::DbId;
use sqlx::PgPool;

use crate::models::server::{CreateServer, Server, ServerWithMap};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, map_id, terminal, brand, compression_threshold, persistent, created_at";

/// Columns for the server-with-map join, qualified by table alias.
const JOINED_COLUMNS: &str = "\
    s.id, s.map_id, s.terminal, s.brand, s.compression_threshold, \
    s.persistent, s.created_at, m.name AS map_name, m.tag AS map_tag";

/// Provides CRUD operations for servers.
pub struct ServerRepo;

impl ServerRepo {
    /// Insert a new server, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateServer) -> Result<Server, sqlx::Error> {
        let query = format!(
            "INSERT INTO servers (map_id, terminal, brand, compression_threshold, persistent)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Server>(&query)
            .bind(input.map_id)
            .bind(input.terminal)
            .bind(&input.brand)
            .bind(input.compression_threshold)
            .bind(input.persistent)
            .fetch_one(pool)
            .await
    }

    /// Find a server together with its map's name and tag.
    pub async fn find_with_map(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServerWithMap>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM servers s
             JOIN maps m ON m.id = s.map_id
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, ServerWithMap>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all servers with their map, newest first.
    pub async fn list_with_map(pool: &PgPool) -> Result<Vec<ServerWithMap>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM servers s
             JOIN maps m ON m.id = s.map_id
             ORDER BY s.created_at DESC, s.id DESC"
        );
        sqlx::query_as::<_, ServerWithMap>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a server by ID. Links go with it via `ON DELETE CASCADE`.
    ///
    /// Returns the number of rows deleted; deleting an absent server is not
    /// an error.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
