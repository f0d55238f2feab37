//! Open-text answer checking

use axum::Json;

use crate::models::{CheckAnswerRequest, CheckAnswerResponse};

/// POST /api/answers/check
pub async fn check(Json(payload): Json<CheckAnswerRequest>) -> Json<CheckAnswerResponse> {
    Json(CheckAnswerResponse {
        is_correct: learn_core::check_answer(&payload.user_answer, &payload.correct_answer),
    })
}
