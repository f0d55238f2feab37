//! Folder endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use learn_core::FolderUpdate;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/folders
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Folder>>> {
    Ok(Json(state.learn.store().folders(auth.user_id)?))
}

/// POST /api/folders
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>)> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let folder = state
        .learn
        .store()
        .create_folder(auth.user_id, name, payload.parent_id)?;
    tracing::info!("Created folder {}", folder.id);
    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/folders/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<FolderResponse>> {
    let store = state.learn.store();
    let folder = store.folder(auth.user_id, id)?;
    let children = store
        .folders(auth.user_id)?
        .into_iter()
        .filter(|f| f.parent_id == Some(id))
        .collect();
    let study_sets = store
        .study_sets(auth.user_id)?
        .into_iter()
        .filter(|s| s.study_set.folder_id == Some(id))
        .collect();

    Ok(Json(FolderResponse {
        folder,
        children,
        study_sets,
    }))
}

/// PUT /api/folders/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFolderRequest>,
) -> Result<Json<Folder>> {
    let name = match payload.name.as_deref().map(str::trim) {
        Some("") => return Err(ApiError::BadRequest("Name is required".to_string())),
        name => name.map(str::to_string),
    };

    let folder = state.learn.store().update_folder(
        auth.user_id,
        id,
        FolderUpdate {
            name,
            parent_id: payload.parent_id,
            position: payload.position,
        },
    )?;
    Ok(Json(folder))
}

/// DELETE /api/folders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    state.learn.store().delete_folder(auth.user_id, id)?;
    tracing::info!("Deleted folder {}", id);
    Ok(Json(DeleteResponse { success: true }))
}
