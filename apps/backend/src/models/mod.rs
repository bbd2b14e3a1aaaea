//! Storage records and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export shared types from review-core
pub use review_core::types::{CardReviewRecord, Feedback, KnowledgeLevel, ReviewStats};

// === Storage Record Types ===

/// Registered user.
///
/// `external_uid` is the stable identifier handed out by the identity
/// provider; local demo accounts only have username/email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_uid: Option<String>,
}

impl User {
    /// Copy with the password blanked, for API responses.
    pub fn sanitized(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

/// A single flashcard. Belongs to exactly one set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub set_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A saved set of flashcards. Belongs to exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub original_question: String,
    pub original_answer: String,
    pub card_count: usize,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_card_style: Option<String>,
}

/// Result of one quiz run over a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizScore {
    pub id: i64,
    pub user_id: i64,
    pub set_id: i64,
    pub score: u32,
    pub total_questions: u32,
    pub created_at: DateTime<Utc>,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Sign-in payload from the opaque identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentitySignInRequest {
    pub external_uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub font: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSetRequest {
    pub user_id: i64,
    pub title: String,
    pub original_question: String,
    pub original_answer: String,
    pub flashcards: Vec<NewCard>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub default_card_style: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetWithCardsResponse {
    #[serde(flatten)]
    pub set: FlashcardSet,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateQuizScoreRequest {
    pub user_id: i64,
    pub set_id: i64,
    pub score: u32,
    pub total_questions: u32,
}

/// Feedback submission: either a typed signal or a raw UI reaction label.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub card_id: String,
    #[serde(default)]
    pub feedback: Option<Feedback>,
    #[serde(default)]
    pub reaction: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(flatten)]
    pub record: CardReviewRecord,
    pub next_review_text: String,
    pub knowledge_level_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueCardsResponse {
    pub card_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpcomingQuery {
    #[serde(default)]
    pub days: Option<i64>,
}
