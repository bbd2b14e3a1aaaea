//! Error types for review-core.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a review store backend.
///
/// The scheduler itself has no fallible operations; failures here come
/// from whatever persistence sits behind the [`ReviewStore`] trait and are
/// propagated to the caller untouched.
///
/// [`ReviewStore`]: crate::store::ReviewStore
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record for card {card_id}: {reason}")]
    CorruptRecord { card_id: String, reason: String },

    #[error("backend error: {0}")]
    Backend(String),
}
