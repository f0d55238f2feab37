//! Learn session endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use learn_core::{NewLearnSession, StdRandom};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/learn-sessions
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateLearnSessionRequest>,
) -> Result<Json<LearnSession>> {
    let request = NewLearnSession {
        study_set_id: payload.study_set_id,
        mastery_goal: payload.mastery_goal.unwrap_or(state.default_mastery_goal),
        flashcard_ids: payload.flashcard_ids,
    };

    let session = state.learn.create_session(auth.user_id, &request)?;
    Ok(Json(session))
}

/// GET /api/learn-sessions/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<LearnSession>> {
    Ok(Json(state.learn.session(auth.user_id, id)?))
}

/// PATCH /api/learn-sessions/{id}
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLearnSessionRequest>,
) -> Result<Json<UpdateLearnSessionResponse>> {
    match payload {
        UpdateLearnSessionRequest {
            is_completed: Some(true),
            ..
        } => {
            let session = state.learn.mark_completed(auth.user_id, id)?;
            Ok(Json(UpdateLearnSessionResponse::Session(session)))
        }
        UpdateLearnSessionRequest {
            is_completed: Some(false),
            ..
        } => Err(ApiError::BadRequest(
            "Completed sessions cannot be reopened".to_string(),
        )),
        UpdateLearnSessionRequest {
            progress_id: Some(progress_id),
            is_correct: Some(is_correct),
            ..
        } => {
            let progress = state
                .learn
                .submit_answer(auth.user_id, id, progress_id, is_correct)?;
            Ok(Json(UpdateLearnSessionResponse::Progress(progress)))
        }
        _ => Err(ApiError::BadRequest("Invalid request".to_string())),
    }
}

/// DELETE /api/learn-sessions/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    state.learn.delete_session(auth.user_id, id)?;
    Ok(Json(DeleteResponse { success: true }))
}

/// GET /api/learn-sessions/{id}/next
pub async fn next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<NextCardResponse>> {
    let mut rng = StdRandom::from_entropy();
    let card = state.learn.next_card(auth.user_id, id, &mut rng)?;
    let progress = state.learn.summary(auth.user_id, id)?;

    let session_state = if card.is_some() {
        SessionState::Learning
    } else {
        SessionState::Complete
    };

    Ok(Json(NextCardResponse {
        card,
        progress,
        state: session_state,
    }))
}

/// POST /api/learn-sessions/{id}/restart
pub async fn restart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<LearnSession>> {
    Ok(Json(state.learn.restart(auth.user_id, id)?))
}

/// POST /api/learn-sessions/{id}/review-wrong
pub async fn review_wrong(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<LearnSession>> {
    Ok(Json(state.learn.review_wrong(auth.user_id, id)?))
}
