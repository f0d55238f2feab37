//! Flashcard edit endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// PUT /api/flashcards/{id}
pub async fn update(
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

    let flashcard = state
        .learn
        .store()
        .update_flashcard(auth.user_id, id, question, answer)?;
    Ok(Json(flashcard))
}

/// DELETE /api/flashcards/{id}
///
/// Learn progress for the card stays in place; a session that selects it
/// afterwards fails closed.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let removed = state.learn.store().delete_flashcard(auth.user_id, id)?;
    tracing::info!(
        "Deleted flashcard {} from study set {}",
        removed.id,
        removed.study_set_id
    );
    Ok(Json(DeleteResponse { success: true }))
}
