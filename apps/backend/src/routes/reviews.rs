//! Review scheduling endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use review_core::DEFAULT_UPCOMING_WINDOW_DAYS;

/// POST /api/reviews/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>> {
    if payload.card_id.trim().is_empty() {
        return Err(ApiError::BadRequest("card_id is required".to_string()));
    }

    let feedback = match (payload.feedback, payload.reaction.as_deref()) {
        (Some(feedback), _) => feedback,
        (None, Some(reaction)) => {
            let mapped = Feedback::from_label(reaction);
            if mapped == Feedback::NotSure && !reaction.eq_ignore_ascii_case("not sure") {
                tracing::warn!(reaction, "unrecognized reaction label, defaulting to not_sure");
            }
            mapped
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either feedback or reaction is required".to_string(),
            ))
        }
    };

    let now = Utc::now();
    let record = state
        .scheduler
        .process_feedback(&payload.card_id, feedback, now)?;

    Ok(Json(FeedbackResponse {
        next_review_text: review_core::format::next_review_text(&record, now),
        knowledge_level_text: record.knowledge_level.label().to_string(),
        record,
    }))
}

/// GET /api/reviews/due
pub async fn due(State(state): State<AppState>) -> Result<Json<DueCardsResponse>> {
    let card_ids = state.scheduler.due_cards(Utc::now())?;
    Ok(Json(DueCardsResponse { card_ids }))
}

/// GET /api/reviews/upcoming?days=N
pub async fn upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<Json<DueCardsResponse>> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_WINDOW_DAYS);
    if days < 0 {
        return Err(ApiError::BadRequest("days must be non-negative".to_string()));
    }

    let card_ids = state.scheduler.upcoming_cards(Utc::now(), days)?;
    Ok(Json(DueCardsResponse { card_ids }))
}

/// GET /api/reviews/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<ReviewStats>> {
    Ok(Json(state.scheduler.stats(Utc::now())?))
}

/// GET /api/reviews/:card_id
pub async fn get_record(
    State(state): State<AppState>,
    Path(card_id): Path<String>,
) -> Result<Json<FeedbackResponse>> {
    let now = Utc::now();
    let record = state.scheduler.record(&card_id, now)?;

    Ok(Json(FeedbackResponse {
        next_review_text: review_core::format::next_review_text(&record, now),
        knowledge_level_text: record.knowledge_level.label().to_string(),
        record,
    }))
}
