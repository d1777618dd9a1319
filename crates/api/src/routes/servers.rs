use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::servers;
use crate::state::AppState;

/// Server routes, merged into `/api`.
///
/// ```text
/// GET    /servers        -> list_servers
/// POST   /servers        -> create_server
/// DELETE /servers/{id}   -> delete_server
/// GET    /server/{id}    -> get_server
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/servers",
            get(servers::list_servers).post(servers::create_server),
        )
        .route("/servers/{id}", delete(servers::delete_server))
        .route("/server/{id}", get(servers::get_server))
}
