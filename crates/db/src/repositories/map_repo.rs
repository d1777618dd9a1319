//! Repository for the `maps` table.

use skyhost_core::types::DbId;
use sqlx::PgPool;

use crate::models::map::{CreateMap, Map};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, tag, description, created_at";

/// Provides CRUD operations for maps.
pub struct MapRepo;

impl MapRepo {
    /// Insert a new map, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMap) -> Result<Map, sqlx::Error> {
        let query = format!(
            "INSERT INTO maps (name, tag, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Map>(&query)
            .bind(&input.name)
            .bind(&input.tag)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a map by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Map>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maps WHERE id = $1");
        sqlx::query_as::<_, Map>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a map by its `(name, tag)` key. Comparison is case-sensitive.
    pub async fn find_by_key(
        pool: &PgPool,
        name: &str,
        tag: &str,
    ) -> Result<Option<Map>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maps WHERE name = $1 AND tag = $2");
        sqlx::query_as::<_, Map>(&query)
            .bind(name)
            .bind(tag)
            .fetch_optional(pool)
            .await
    }

    /// List all maps, ordered by name then tag.
    pub async fn list(pool: &PgPool) -> Result<Vec<Map>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maps ORDER BY name, tag");
        sqlx::query_as::<_, Map>(&query).fetch_all(pool).await
    }

    /// List every tag of the map called `name`.
    pub async fn list_by_name(pool: &PgPool, name: &str) -> Result<Vec<Map>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maps WHERE name = $1 ORDER BY tag");
        sqlx::query_as::<_, Map>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Delete a map by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
