use std::str::FromStr;

/// What the create workflow does when the container cannot be created or
/// started after the server record and its links were committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchFailurePolicy {
    /// Remove the container (if one was created), the links and the record,
    /// then report `ProvisionFailed`.
    #[default]
    Rollback,
    /// Leave the record and links in place and report the runtime error.
    KeepRecord,
}

impl FromStr for LaunchFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rollback" | "true" => Ok(Self::Rollback),
            "keep" | "keep-record" | "false" => Ok(Self::KeepRecord),
            other => Err(format!("unknown launch failure policy '{other}'")),
        }
    }
}

/// Settings injected into the [`Orchestrator`](crate::Orchestrator) at
/// construction.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Shared credential handed to servers as `SERVER_KEY`.
    pub server_key: String,
    /// Callback address handed to servers as `SERVER_URL`.
    pub self_url: String,
    /// Game-server image tag.
    pub image: String,
    /// Network every server container joins.
    pub network: String,
    pub launch_failure: LaunchFailurePolicy,
}
