//! User registration endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::models::{RegisterRequest, RegisterResponse};
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    let user = state.db.create_user(payload.name.as_deref())?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}
