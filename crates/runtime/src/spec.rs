//! Runtime-agnostic container descriptions.

use serde::Serialize;

/// Everything needed to create a game-server container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpec {
    /// Container name; the only link back to the owning server record.
    pub name: String,
    pub image: String,
    pub hostname: String,
    /// `KEY=value` entries.
    pub env: Vec<String>,
    /// Network the container is attached to.
    pub network: String,
    pub tty: bool,
    pub open_stdin: bool,
}

/// Lifecycle state as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    Unknown,
}

impl ContainerState {
    /// Parse the Docker `State` string.
    pub fn from_docker(state: &str) -> Self {
        match state {
            "created" => Self::Created,
            "running" => Self::Running,
            "paused" => Self::Paused,
            "restarting" => Self::Restarting,
            "removing" => Self::Removing,
            "exited" => Self::Exited,
            "dead" => Self::Dead,
            _ => Self::Unknown,
        }
    }
}

/// One entry of a container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub id: String,
    /// Primary name without Docker's leading `/`.
    pub name: String,
    pub state: ContainerState,
}

impl ContainerSummary {
    pub fn is_running(&self) -> bool {
        self.state == ContainerState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_states() {
        assert_eq!(ContainerState::from_docker("running"), ContainerState::Running);
        assert_eq!(ContainerState::from_docker("exited"), ContainerState::Exited);
        assert_eq!(ContainerState::from_docker("bogus"), ContainerState::Unknown);
    }

    #[test]
    fn only_running_counts_as_running() {
        let mut summary = ContainerSummary {
            id: "abc".into(),
            name: "server-1".into(),
            state: ContainerState::Paused,
        };
        assert!(!summary.is_running());
        summary.state = ContainerState::Running;
        assert!(summary.is_running());
    }
}
