//! Flashcard set endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/flashcard-sets
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateSetRequest>,
) -> Result<(StatusCode, Json<FlashcardSet>)> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }
    if state.storage.get_user(payload.user_id).is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let set = state.storage.create_set(&payload);
    for card in payload.flashcards {
        state.storage.create_flashcard(set.id, card);
    }

    Ok((StatusCode::CREATED, Json(set)))
}

/// GET /api/users/:user_id/flashcard-sets
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<FlashcardSet>>> {
    Ok(Json(state.storage.get_sets_by_user(user_id)))
}

/// GET /api/flashcard-sets/:set_id
pub async fn get(
    State(state): State<AppState>,
    Path(set_id): Path<i64>,
) -> Result<Json<SetWithCardsResponse>> {
    let set = state
        .storage
        .get_set(set_id)
        .ok_or_else(|| ApiError::NotFound("Flashcard set not found".to_string()))?;
    let flashcards = state.storage.get_flashcards_by_set(set_id);

    Ok(Json(SetWithCardsResponse { set, flashcards }))
}

/// DELETE /api/flashcard-sets/:set_id
///
/// Cascades to the set's flashcards and drops their review records.
pub async fn delete(
    State(state): State<AppState>,
    Path(set_id): Path<i64>,
) -> Result<StatusCode> {
    if state.storage.get_set(set_id).is_none() {
        return Err(ApiError::NotFound("Flashcard set not found".to_string()));
    }

    let deleted_card_ids = state.storage.delete_set(set_id);
    for card_id in &deleted_card_ids {
        state.scheduler.store().remove(&card_id.to_string());
    }
    tracing::debug!(set_id, cards = deleted_card_ids.len(), "deleted flashcard set");

    Ok(StatusCode::NO_CONTENT)
}
