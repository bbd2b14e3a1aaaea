//! Spaced-repetition review scheduling.
//!
//! Provides:
//! - SM-2 style update rule over a four-signal feedback vocabulary
//! - Knowledge-level state machine (New -> Learning -> Reviewing -> Mastered)
//! - Review store interface with an in-memory implementation
//! - Due/upcoming/statistics queries and human-readable scheduling text

pub mod error;
pub mod format;
pub mod scheduler;
pub mod sm2;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use scheduler::{ReviewScheduler, DEFAULT_UPCOMING_WINDOW_DAYS};
pub use sm2::{Sm2, BASE_INTERVALS};
pub use store::{MemoryReviewStore, ReviewStore};
pub use types::{CardReviewRecord, Feedback, KnowledgeLevel, ReviewStats};
