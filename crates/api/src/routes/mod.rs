pub mod content;
pub mod health;
pub mod servers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Every route below requires `?key=<API_KEY>`; the gate is applied by
/// [`crate::router::build_app_router`].
///
/// ```text
/// /maps                                            list, upload
/// /maps/{name}                                     list tags of one map
/// /map/{name}/{tag}                                download map payload
///
/// /extensions                                      list, upload
/// /extension/{name}/{tag}                          download extension payload
///
/// /servers                                         list, create (provision)
/// /servers/{id}                                    delete (tear down)
/// /server/{id}                                     get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router())
        .merge(servers::router())
}
