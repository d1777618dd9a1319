//! Repository for the `extensions` table.

use skyhost_core::types::DbId;
use sqlx::PgPool;

use crate::models::extension::{CreateExtension, Extension};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, tag, description, created_at";

/// Provides CRUD operations for extensions.
pub struct ExtensionRepo;

impl ExtensionRepo {
    /// Insert a new extension, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateExtension,
    ) -> Result<Extension, sqlx::Error> {
        let query = format!(
            "INSERT INTO extensions (name, tag, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Extension>(&query)
            .bind(&input.name)
            .bind(&input.tag)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find an extension by its `(name, tag)` key. Comparison is case-sensitive.
    pub async fn find_by_key(
        pool: &PgPool,
        name: &str,
        tag: &str,
    ) -> Result<Option<Extension>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM extensions WHERE name = $1 AND tag = $2");
        sqlx::query_as::<_, Extension>(&query)
            .bind(name)
            .bind(tag)
            .fetch_optional(pool)
            .await
    }

    /// List all extensions, ordered by name then tag.
    pub async fn list(pool: &PgPool) -> Result<Vec<Extension>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM extensions ORDER BY name, tag");
        sqlx::query_as::<_, Extension>(&query).fetch_all(pool).await
    }

    /// Delete an extension by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM extensions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
