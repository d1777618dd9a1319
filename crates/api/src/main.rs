use std::net::SocketAddr;
use std::sync::Arc;

use skyhost_core::assets::LocalAssetStore;
use skyhost_provision::{Orchestrator, PgResourceStore};
use skyhost_runtime::DockerRuntime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyhost_api::config::ServerConfig;
use skyhost_api::router::build_app_router;
use skyhost_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skyhost_api=debug,skyhost_provision=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        image = %config.server_image,
        network = %config.server_network,
        launch_failure = ?config.launch_failure,
        "Loaded server configuration",
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = skyhost_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    skyhost_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    skyhost_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Container runtime ---
    let runtime = DockerRuntime::connect_local().expect("Failed to configure Docker client");
    runtime
        .ping()
        .await
        .expect("Docker daemon is not reachable");
    tracing::info!("Docker daemon reachable");

    // --- Asset store ---
    let assets = LocalAssetStore::new(config.data_dir.clone());
    assets
        .ensure_layout()
        .await
        .expect("Failed to prepare asset directories");
    tracing::info!(root = %assets.root().display(), "Asset store ready");

    // --- Orchestrator ---
    let orchestrator = Orchestrator::new(
        Arc::new(PgResourceStore::new(pool.clone())),
        Arc::new(runtime),
        config.provision_config(),
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
        assets: Arc::new(assets),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
