//! Route definitions for the map and extension catalogue.

use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Catalogue routes, merged into `/api`.
///
/// ```text
/// GET  /maps                     -> list_maps
/// POST /maps                     -> upload_map
/// GET  /maps/{name}              -> list_map_tags
/// GET  /map/{name}/{tag}         -> download_map
/// GET  /extensions               -> list_extensions
/// POST /extensions               -> upload_extension
/// GET  /extension/{name}/{tag}   -> download_extension
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/maps", get(content::list_maps).post(content::upload_map))
        .route("/maps/{name}", get(content::list_map_tags))
        .route("/map/{name}/{tag}", get(content::download_map))
        .route(
            "/extensions",
            get(content::list_extensions).post(content::upload_extension),
        )
        .route("/extension/{name}/{tag}", get(content::download_extension))
}
