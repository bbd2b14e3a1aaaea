//! Quiz score endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/quiz-scores
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuizScoreRequest>,
) -> Result<(StatusCode, Json<QuizScore>)> {
    if state.storage.get_user(payload.user_id).is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    if state.storage.get_set(payload.set_id).is_none() {
        return Err(ApiError::NotFound("Flashcard set not found".to_string()));
    }
    if payload.score > payload.total_questions {
        return Err(ApiError::BadRequest(
            "score cannot exceed total_questions".to_string(),
        ));
    }

    let score = state.storage.create_quiz_score(&payload);
    Ok((StatusCode::CREATED, Json(score)))
}

/// GET /api/users/:user_id/quiz-scores
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<QuizScore>>> {
    Ok(Json(state.storage.get_quiz_scores_by_user(user_id)))
}
