//! Domain building blocks shared by every skyhost crate.
//!
//! Nothing in here talks to the database or the container runtime; the
//! modules hold the conventions both sides have to agree on (composite
//! keys, container naming, the launch environment, asset layout).

pub mod assets;
pub mod error;
pub mod launch;
pub mod naming;
pub mod reference;
pub mod types;
