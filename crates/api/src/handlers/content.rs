//! Handlers for the map and extension catalogue.
//!
//! Uploads carry the payload inline as base64. The record is inserted
//! first so its generated id can name the file; a failed file write
//! deletes the record again.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use skyhost_core::assets::AssetKind;
use skyhost_core::error::CoreError;
use skyhost_core::reference::{self, KEY_SEPARATOR};
use skyhost_core::types::DbId;
use skyhost_db::models::extension::CreateExtension;
use skyhost_db::models::map::CreateMap;
use skyhost_db::repositories::{ExtensionRepo, MapRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /api/maps` and `POST /api/extensions`.
#[derive(Debug, Deserialize)]
pub struct ContentUploadRequest {
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub description: String,
    /// Base64 (standard alphabet) encoded payload.
    pub data: String,
}

/// Check the key fields and decode the payload. Nothing is persisted when
/// this fails.
fn decode_upload(input: &ContentUploadRequest) -> AppResult<Vec<u8>> {
    if input.name.is_empty() || input.tag.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name and tag must not be empty".into(),
        )));
    }
    // The key is split on the first separator, so only the name must avoid it.
    if input.name.contains(KEY_SEPARATOR) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "name must not contain '{KEY_SEPARATOR}'"
        ))));
    }

    STANDARD
        .decode(input.data.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("data is not valid base64: {e}")))
}

/// Log a failed compensating delete. The asset error is what the caller sees.
fn log_discard(kind: AssetKind, id: DbId, result: Result<bool, sqlx::Error>) {
    match result {
        Ok(_) => tracing::warn!(
            entity = kind.label(),
            id,
            "Record discarded after asset write failure",
        ),
        Err(e) => tracing::error!(
            entity = kind.label(),
            id,
            error = %e,
            "Failed to discard record after asset write failure",
        ),
    }
}

fn binary_response(kind: AssetKind, name: &str, tag: &str, bytes: Vec<u8>) -> impl IntoResponse {
    let disposition = format!(
        "attachment; filename=\"{name}-{tag}.{}\"",
        kind.file_extension()
    );
    (
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
}

fn not_found(kind: AssetKind, name: &str, tag: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.label(),
        key: reference::summary(name, tag),
    })
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

/// GET /api/maps
pub async fn list_maps(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let maps = MapRepo::list(&state.pool).await?;
    Ok(Json(maps))
}

/// GET /api/maps/{name}
///
/// Every tag uploaded under one map name. An unknown name yields `[]`.
pub async fn list_map_tags(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let maps = MapRepo::list_by_name(&state.pool, &name).await?;
    Ok(Json(maps))
}

/// POST /api/maps
pub async fn upload_map(
    State(state): State<AppState>,
    Json(input): Json<ContentUploadRequest>,
) -> AppResult<impl IntoResponse> {
    let bytes = decode_upload(&input)?;

    let map = MapRepo::create(
        &state.pool,
        &CreateMap {
            name: input.name,
            tag: input.tag,
            description: input.description,
        },
    )
    .await?;

    if let Err(e) = state.assets.write(AssetKind::Map, map.id, &bytes).await {
        log_discard(
            AssetKind::Map,
            map.id,
            MapRepo::delete(&state.pool, map.id).await,
        );
        return Err(e.into());
    }

    tracing::info!(map_id = map.id, key = %map.key(), size = bytes.len(), "Map uploaded");

    Ok((StatusCode::CREATED, Json(map)))
}

/// GET /api/map/{name}/{tag}
pub async fn download_map(
    State(state): State<AppState>,
    Path((name, tag)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let map = MapRepo::find_by_key(&state.pool, &name, &tag)
        .await?
        .ok_or_else(|| not_found(AssetKind::Map, &name, &tag))?;

    let bytes = state.assets.read(AssetKind::Map, map.id).await?;

    Ok(binary_response(AssetKind::Map, &name, &tag, bytes))
}

// ---------------------------------------------------------------------------
// Extensions
// ---------------------------------------------------------------------------

/// GET /api/extensions
pub async fn list_extensions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let extensions = ExtensionRepo::list(&state.pool).await?;
    Ok(Json(extensions))
}

/// POST /api/extensions
pub async fn upload_extension(
    State(state): State<AppState>,
    Json(input): Json<ContentUploadRequest>,
) -> AppResult<impl IntoResponse> {
    let bytes = decode_upload(&input)?;

    let extension = ExtensionRepo::create(
        &state.pool,
        &CreateExtension {
            name: input.name,
            tag: input.tag,
            description: input.description,
        },
    )
    .await?;

    if let Err(e) = state
        .assets
        .write(AssetKind::Extension, extension.id, &bytes)
        .await
    {
        log_discard(
            AssetKind::Extension,
            extension.id,
            ExtensionRepo::delete(&state.pool, extension.id).await,
        );
        return Err(e.into());
    }

    tracing::info!(
        extension_id = extension.id,
        key = %extension.key(),
        size = bytes.len(),
        "Extension uploaded",
    );

    Ok((StatusCode::CREATED, Json(extension)))
}

/// GET /api/extension/{name}/{tag}
pub async fn download_extension(
    State(state): State<AppState>,
    Path((name, tag)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let extension = ExtensionRepo::find_by_key(&state.pool, &name, &tag)
        .await?
        .ok_or_else(|| not_found(AssetKind::Extension, &name, &tag))?;

    let bytes = state
        .assets
        .read(AssetKind::Extension, extension.id)
        .await?;

    Ok(binary_response(AssetKind::Extension, &name, &tag, bytes))
}
