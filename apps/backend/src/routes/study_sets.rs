//! Study set endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use learn_core::{parse_flashcards, LearnStore, NewStudySet, StudySetUpdate};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/study-sets
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<StudySetSummary>>> {
    Ok(Json(state.learn.store().study_sets(auth.user_id)?))
}

/// POST /api/study-sets
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateStudySetRequest>,
) -> Result<Json<StudySetResponse>> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("Title is required".to_string()));
    }

    let store = state.learn.store();
    let study_set = store.create_study_set(
        auth.user_id,
        NewStudySet {
            title: title.to_string(),
            description: payload.description,
            folder_id: payload.folder_id,
            is_favorite: payload.is_favorite,
        },
    )?;
    let flashcards = store.add_flashcards(
        auth.user_id,
        study_set.id,
        payload
            .flashcards
            .into_iter()
            .map(|c| (c.question, c.answer)),
    )?;

    tracing::info!(
        "Created study set {} with {} flashcards",
        study_set.id,
        flashcards.len()
    );

    Ok(Json(StudySetResponse {
        study_set,
        flashcards,
    }))
}

/// GET /api/study-sets/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudySetResponse>> {
    let store = state.learn.store();
    let study_set = store.mark_accessed(auth.user_id, id)?;
    let flashcards = store.study_set_cards(auth.user_id, id)?;

    Ok(Json(StudySetResponse {
        study_set,
        flashcards,
    }))
}

/// PUT /api/study-sets/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStudySetRequest>,
) -> Result<Json<StudySet>> {
    let title = match payload.title.as_deref().map(str::trim) {
        Some("") => return Err(ApiError::BadRequest("Title is required".to_string())),
        title => title.map(str::to_string),
    };

    let study_set = state.learn.store().update_study_set(
        auth.user_id,
        id,
        StudySetUpdate {
            title,
            description: payload.description,
            folder_id: payload.folder_id,
            is_favorite: payload.is_favorite,
        },
    )?;

    Ok(Json(study_set))
}

/// DELETE /api/study-sets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    state.learn.store().delete_study_set(auth.user_id, id)?;
    tracing::info!("Deleted study set {}", id);
    Ok(Json(DeleteResponse { success: true }))
}

/// POST /api/study-sets/{id}/flashcards
pub async fn add_flashcard(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewFlashcard>,
) -> Result<Json<Flashcard>> {
    let question = payload.question.trim();
    let answer = payload.answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest(
            "Question and answer are required".to_string(),
        ));
    }

    let created = state
        .learn
        .store()
        .add_flashcards(auth.user_id, id, [(question, answer)])?;

    created
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| ApiError::Internal("Flashcard was not created".to_string()))
}

/// POST /api/study-sets/{id}/flashcards/bulk
pub async fn bulk_import(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<BulkImportRequest>,
) -> Result<Json<BulkImportResponse>> {
    let store = state.learn.store();
    // Ownership check first so a foreign set reports 404 rather than a parse error.
    store.study_set(auth.user_id, id)?;

    let outcome = parse_flashcards(&payload.text)?;
    let flashcards = store.add_flashcards(
        auth.user_id,
        id,
        outcome
            .flashcards
            .into_iter()
            .map(|c| (c.question, c.answer)),
    )?;

    tracing::info!(
        "Imported {} flashcards into study set {} ({})",
        flashcards.len(),
        id,
        outcome.format.label()
    );

    Ok(Json(BulkImportResponse {
        count: flashcards.len(),
        detected_format: outcome.format.label().to_string(),
        flashcards,
    }))
}
