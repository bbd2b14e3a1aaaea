//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Create a register request body.
pub fn register_request(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "email": email,
        "password": "hunter2",
    })
}

/// Create an identity sign-in request body.
pub fn identity_request(external_uid: &str, email: Option<&str>) -> Value {
    json!({
        "external_uid": external_uid,
        "email": email,
        "display_name": "Test User",
    })
}

/// Create a flashcard-set creation body with `num_cards` cards.
pub fn create_set_request(user_id: i64, num_cards: usize) -> Value {
    let flashcards: Vec<Value> = (0..num_cards)
        .map(|i| {
            json!({
                "question": format!("Question {}?", i + 1),
                "answer": format!("Answer {}.", i + 1),
                "tags": ["test"],
            })
        })
        .collect();

    json!({
        "user_id": user_id,
        "title": "Ownership basics",
        "original_question": "What is ownership?",
        "original_answer": "A set of rules governing how memory is managed.",
        "flashcards": flashcards,
    })
}

/// Create a quiz score submission body.
pub fn quiz_score_request(user_id: i64, set_id: i64, score: u32, total: u32) -> Value {
    json!({
        "user_id": user_id,
        "set_id": set_id,
        "score": score,
        "total_questions": total,
    })
}

/// Create a feedback submission body with a typed feedback value.
pub fn feedback_request(card_id: &str, feedback: &str) -> Value {
    json!({
        "card_id": card_id,
        "feedback": feedback,
    })
}

/// Create a feedback submission body with a raw UI reaction label.
pub fn reaction_request(card_id: &str, reaction: &str) -> Value {
    json!({
        "card_id": card_id,
        "reaction": reaction,
    })
}
