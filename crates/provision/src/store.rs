//! Resource store seam used by the orchestrator.

use async_trait::async_trait;
use skyhost_core::reference::CompositeKey;
use skyhost_core::types::DbId;
use skyhost_db::models::extension::Extension;
use skyhost_db::models::map::Map;
use skyhost_db::models::server::{CreateServer, Server};
use skyhost_db::models::server_extension::{CreateServerExtension, ServerExtension};
use skyhost_db::repositories::{ExtensionRepo, MapRepo, ServerExtensionRepo, ServerRepo};
use skyhost_db::DbPool;

/// The record operations the provisioning workflows depend on.
///
/// Deletes report the number of rows removed and are safe to repeat.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn find_map(&self, key: &CompositeKey) -> Result<Option<Map>, sqlx::Error>;

    async fn find_extension(&self, key: &CompositeKey) -> Result<Option<Extension>, sqlx::Error>;

    async fn create_server(&self, input: &CreateServer) -> Result<Server, sqlx::Error>;

    async fn link_extension(
        &self,
        input: &CreateServerExtension,
    ) -> Result<ServerExtension, sqlx::Error>;

    async fn delete_server_links(&self, server_id: DbId) -> Result<u64, sqlx::Error>;

    async fn delete_server(&self, server_id: DbId) -> Result<u64, sqlx::Error>;
}

/// [`ResourceStore`] over the Postgres repositories.
#[derive(Debug, Clone)]
pub struct PgResourceStore {
    pool: DbPool,
}

impl PgResourceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn find_map(&self, key: &CompositeKey) -> Result<Option<Map>, sqlx::Error> {
        MapRepo::find_by_key(&self.pool, &key.name, &key.tag).await
    }

    async fn find_extension(&self, key: &CompositeKey) -> Result<Option<Extension>, sqlx::Error> {
        ExtensionRepo::find_by_key(&self.pool, &key.name, &key.tag).await
    }

    async fn create_server(&self, input: &CreateServer) -> Result<Server, sqlx::Error> {
        ServerRepo::create(&self.pool, input).await
    }

    async fn link_extension(
        &self,
        input: &CreateServerExtension,
    ) -> Result<ServerExtension, sqlx::Error> {
        ServerExtensionRepo::create(&self.pool, input).await
    }

    async fn delete_server_links(&self, server_id: DbId) -> Result<u64, sqlx::Error> {
        ServerExtensionRepo::delete_for_server(&self.pool, server_id).await
    }

    async fn delete_server(&self, server_id: DbId) -> Result<u64, sqlx::Error> {
        ServerRepo::delete(&self.pool, server_id).await
    }
}
