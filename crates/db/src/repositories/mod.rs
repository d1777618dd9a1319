//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod extension_repo;
pub mod map_repo;
pub mod server_extension_repo;
pub mod server_repo;

pub use extension_repo::ExtensionRepo;
pub use map_repo::MapRepo;
pub use server_extension_repo::ServerExtensionRepo;
pub use server_repo::ServerRepo;
