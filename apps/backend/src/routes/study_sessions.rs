//! Flip-card study pass endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/study-sessions
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<NewStudySession>,
) -> Result<(StatusCode, Json<StudySession>)> {
    if payload.correct_cards.saturating_add(payload.wrong_cards) > payload.total_cards {
        return Err(ApiError::BadRequest(
            "Correct and wrong cards exceed the total".to_string(),
        ));
    }

    let session = state
        .learn
        .store()
        .record_study_session(auth.user_id, payload)?;
    tracing::info!(
        "Recorded study session {} for study set {}",
        session.id,
        session.study_set_id
    );
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/study-sessions?studySetId=
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<StudySessionQuery>,
) -> Result<Json<Vec<StudySession>>> {
    let sessions = state
        .learn
        .store()
        .study_sessions(auth.user_id, query.study_set_id)?;
    Ok(Json(sessions))
}
