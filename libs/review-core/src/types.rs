//! Core types for review scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse bucket summarizing how well a card is known.
///
/// The integer values are part of the scheduling contract: interval
/// selection branches on them and promotion is `value + 1`. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    New,
    Learning,
    Reviewing,
    Mastered,
}

impl Default for KnowledgeLevel {
    fn default() -> Self {
        Self::New
    }
}

impl KnowledgeLevel {
    /// Convert to the fixed ordinal value (0-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Learning => 1,
            Self::Reviewing => 2,
            Self::Mastered => 3,
        }
    }

    /// Create from the fixed ordinal value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::New),
            1 => Some(Self::Learning),
            2 => Some(Self::Reviewing),
            3 => Some(Self::Mastered),
            _ => None,
        }
    }

    /// One step up, capped at Mastered.
    pub fn promoted(self) -> Self {
        match self {
            Self::New => Self::Learning,
            Self::Learning => Self::Reviewing,
            Self::Reviewing | Self::Mastered => Self::Mastered,
        }
    }

    /// Display label shown to the learner.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Learning => "Learning",
            Self::Reviewing => "Reviewing",
            Self::Mastered => "Mastered",
        }
    }
}

/// The discrete signal a learner gives after seeing a card's answer.
///
/// Ordinal values feed the SM-2 quality formula (`quality = value + 2` for
/// the remembered arms), so they are fixed: Confused=0, NotSure=1,
/// GotIt=2, Easy=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Confused,
    NotSure,
    GotIt,
    Easy,
}

impl Feedback {
    /// Convert to the fixed ordinal value (0-3).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Confused => 0,
            Self::NotSure => 1,
            Self::GotIt => 2,
            Self::Easy => 3,
        }
    }

    /// Create from the fixed ordinal value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Confused),
            1 => Some(Self::NotSure),
            2 => Some(Self::GotIt),
            3 => Some(Self::Easy),
            _ => None,
        }
    }

    /// SM-2 recall quality (3-5) for the remembered arms.
    ///
    /// Confused never reaches the quality formula; it takes the reset
    /// branch instead.
    pub fn quality(self) -> u8 {
        self.to_value() + 2
    }

    /// Map a UI reaction label to a feedback signal.
    ///
    /// Case-insensitive, total: unrecognized labels fall back to NotSure
    /// rather than failing. Callers that care can log the miss.
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "confused" => Self::Confused,
            "not sure" => Self::NotSure,
            "got it!" => Self::GotIt,
            "review again" => Self::Easy,
            _ => Self::NotSure,
        }
    }
}

/// Per-card review scheduling state, keyed by an opaque card identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReviewRecord {
    pub card_id: String,
    pub knowledge_level: KnowledgeLevel,
    /// Per-card difficulty multiplier; 1.3 is the hardest allowed.
    pub easiness_factor: f64,
    /// Consecutive non-Confused feedback events.
    pub consecutive_correct: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<DateTime<Utc>>,
    pub next_review_date: DateTime<Utc>,
}

impl CardReviewRecord {
    /// Whether the card is due at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

/// Aggregate counts across all known review records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub reviewing_cards: usize,
    pub mastered_cards: usize,
    pub due_cards: usize,
    pub upcoming_cards: usize,
}
