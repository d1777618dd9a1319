//! Environment handed to every launched game server.
//!
//! The game server reads these variables on boot to learn who it is and
//! how to call back into this service.

use crate::types::DbId;

pub const ENV_SERVER_ID: &str = "SERVER_ID";
pub const ENV_SERVER_KEY: &str = "SERVER_KEY";
pub const ENV_SERVER_URL: &str = "SERVER_URL";
/// Spelled the way the game-server image expects it.
pub const ENV_PERSISTENT: &str = "PRESISTENT";
pub const ENV_FORWARDING_SECRET: &str = "FORWARDING_SECRET";

/// Inputs for [`launch_env`].
#[derive(Debug, Clone, Copy)]
pub struct LaunchParams<'a> {
    pub server_id: DbId,
    /// Shared credential the server uses to authenticate back.
    pub server_key: &'a str,
    /// Callback address of this service.
    pub self_url: &'a str,
    pub persistent: bool,
    pub forwarding_secret: Option<&'a str>,
}

/// Build the `KEY=value` list for a container, in a fixed order.
///
/// `FORWARDING_SECRET` is only present when a non-empty secret was given.
pub fn launch_env(params: &LaunchParams<'_>) -> Vec<String> {
    let mut env = vec![
        format!("{ENV_SERVER_ID}={}", params.server_id),
        format!("{ENV_SERVER_KEY}={}", params.server_key),
        format!("{ENV_SERVER_URL}={}", params.self_url),
        format!("{ENV_PERSISTENT}={}", params.persistent),
    ];

    if let Some(secret) = params.forwarding_secret.filter(|s| !s.is_empty()) {
        env.push(format!("{ENV_FORWARDING_SECRET}={secret}"));
    }

    env
}
