//! Provisioning orchestrator.
//!
//! Keeps three things in step that live in two systems: the server record
//! and its extension links (resource store) and the server's container
//! (container runtime). There is no shared transaction, so the create
//! workflow undoes what it already committed when a later step fails.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod store;

pub use config::{LaunchFailurePolicy, ProvisionConfig};
pub use error::{ErrorKind, ProvisionError, UpstreamError};
pub use orchestrator::{CreateServerRequest, Orchestrator, ProvisionedServer};
pub use store::{PgResourceStore, ResourceStore};
