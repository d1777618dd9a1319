use std::path::PathBuf;

use skyhost_provision::{LaunchFailurePolicy, ProvisionConfig};

/// Server configuration loaded from environment variables.
///
/// `API_KEY` and `SELF_URL` have no default; everything else falls back to
/// values suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body, uploads included (default: 256 MiB).
    pub max_body_bytes: usize,
    /// Shared credential: required on every `/api` request and handed to
    /// game servers as `SERVER_KEY`.
    pub api_key: String,
    /// Address game servers use to call back into this service.
    pub self_url: String,
    /// Root directory of the asset store (default: `./data`).
    pub data_dir: PathBuf,
    /// Game-server image (default: `skystom`).
    pub server_image: String,
    /// Network game-server containers join (default: `mc-servers`).
    pub server_network: String,
    /// Host reported to clients in server responses (default: `0.0.0.0`).
    pub advertised_host: String,
    /// Port reported to clients in server responses (default: `25565`).
    pub advertised_port: u16,
    /// Rollback behaviour when a container fails to launch.
    pub launch_failure: LaunchFailurePolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default      |
    /// |------------------------------|--------------|
    /// | `HOST`                       | `0.0.0.0`    |
    /// | `PORT`                       | `8080`       |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`         |
    /// | `MAX_BODY_BYTES`             | `268435456`  |
    /// | `API_KEY`                    | required     |
    /// | `SELF_URL`                   | required     |
    /// | `DATA_DIR`                   | `./data`     |
    /// | `SERVER_IMAGE`               | `skystom`    |
    /// | `SERVER_NETWORK`             | `mc-servers` |
    /// | `ADVERTISED_HOST`            | `0.0.0.0`    |
    /// | `ADVERTISED_PORT`            | `25565`      |
    /// | `ROLLBACK_ON_LAUNCH_FAILURE` | `true`       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| (256 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let api_key = std::env::var("API_KEY").expect("API_KEY must be set");
        let self_url = std::env::var("SELF_URL").expect("SELF_URL must be set");

        let data_dir = std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();

        let server_image = std::env::var("SERVER_IMAGE").unwrap_or_else(|_| "skystom".into());
        let server_network =
            std::env::var("SERVER_NETWORK").unwrap_or_else(|_| "mc-servers".into());

        let advertised_host =
            std::env::var("ADVERTISED_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let advertised_port: u16 = std::env::var("ADVERTISED_PORT")
            .unwrap_or_else(|_| "25565".into())
            .parse()
            .expect("ADVERTISED_PORT must be a valid u16");

        let launch_failure: LaunchFailurePolicy = std::env::var("ROLLBACK_ON_LAUNCH_FAILURE")
            .unwrap_or_else(|_| "true".into())
            .parse()
            .unwrap_or_else(|e| panic!("ROLLBACK_ON_LAUNCH_FAILURE: {e}"));

        Self {
            host,
            port,
            request_timeout_secs,
            max_body_bytes,
            api_key,
            self_url,
            data_dir,
            server_image,
            server_network,
            advertised_host,
            advertised_port,
            launch_failure,
        }
    }

    /// Orchestrator settings derived from this configuration.
    pub fn provision_config(&self) -> ProvisionConfig {
        ProvisionConfig {
            server_key: self.api_key.clone(),
            self_url: self.self_url.clone(),
            image: self.server_image.clone(),
            network: self.server_network.clone(),
            launch_failure: self.launch_failure,
        }
    }
}
