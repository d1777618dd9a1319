//! Container naming convention.
//!
//! A server record and its container are bound only by name: the container
//! for server `42` is always called `server-42`. Both the create and the
//! delete workflow go through these functions so the convention lives in
//! exactly one place.

use crate::types::DbId;

/// Fixed prefix of every game-server container name.
pub const CONTAINER_NAME_PREFIX: &str = "server-";

/// Derive the container name for a server.
///
/// # Examples
///
/// ```
/// use skyhost_core::naming::container_name;
///
/// assert_eq!(container_name(42), "server-42");
/// ```
pub fn container_name(server_id: DbId) -> String {
    format!("{CONTAINER_NAME_PREFIX}{server_id}")
}

/// Recover the server id from a container name.
///
/// Docker reports names with a leading `/`; it is ignored. Returns `None`
/// for containers that do not follow the convention, including ids that
/// [`container_name`] would never produce (`server-05`, `server-+5`).
pub fn server_id_from_container_name(name: &str) -> Option<DbId> {
    let suffix = name
        .trim_start_matches('/')
        .strip_prefix(CONTAINER_NAME_PREFIX)?;
    let id: DbId = suffix.parse().ok()?;
    (id.to_string() == suffix).then_some(id)
}

/// Whether a name observed in the runtime belongs to `server_id`.
pub fn is_container_for(name: &str, server_id: DbId) -> bool {
    server_id_from_container_name(name) == Some(server_id)
}
