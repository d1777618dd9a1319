//! Repository for the `server_extensions` join table.

use skyhost_core::types::DbId;
use sqlx::PgPool;

use crate::models::server_extension::{CreateServerExtension, LinkedExtension, ServerExtension};

const COLUMNS: &str = "id, server_id, extension_id, position, created_at";

/// Provides link operations between servers and extensions.
pub struct ServerExtensionRepo;

impl ServerExtensionRepo {
    /// Insert a link, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateServerExtension,
    ) -> Result<ServerExtension, sqlx::Error> {
        let query = format!(
            "INSERT INTO server_extensions (server_id, extension_id, position)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ServerExtension>(&query)
            .bind(input.server_id)
            .bind(input.extension_id)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    /// List the extensions linked to a server, in request order.
    pub async fn list_for_server(
        pool: &PgPool,
        server_id: DbId,
    ) -> Result<Vec<LinkedExtension>, sqlx::Error> {
        sqlx::query_as::<_, LinkedExtension>(
            "SELECT e.id AS extension_id, e.name, e.tag
             FROM server_extensions se
             JOIN extensions e ON e.id = se.extension_id
             WHERE se.server_id = $1
             ORDER BY se.position, se.id",
        )
        .bind(server_id)
        .fetch_all(pool)
        .await
    }

    /// Count links held by a server.
    pub async fn count_for_server(pool: &PgPool, server_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM server_extensions WHERE server_id = $1")
            .bind(server_id)
            .fetch_one(pool)
            .await
    }

    /// Delete every link of a server. Returns the number of rows deleted.
    pub async fn delete_for_server(pool: &PgPool, server_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM server_extensions WHERE server_id = $1")
            .bind(server_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
