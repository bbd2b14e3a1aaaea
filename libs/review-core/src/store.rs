//! Review record persistence interface.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::types::CardReviewRecord;

/// Durable mapping from card identifier to its review record.
///
/// The scheduler is written against this seam so it can run over any
/// backing store; failures propagate to the caller as [`StoreError`].
///
/// [`StoreError`]: crate::error::StoreError
pub trait ReviewStore: Send + Sync {
    /// Fetch the record for a card, if one exists.
    fn get(&self, card_id: &str) -> Result<Option<CardReviewRecord>>;

    /// Insert or replace the record for its card.
    fn put(&self, record: CardReviewRecord) -> Result<()>;

    /// Snapshot of every known record, for due/upcoming scans.
    fn all(&self) -> Result<Vec<CardReviewRecord>>;
}

/// In-memory store backed by a `RwLock<HashMap>`.
#[derive(Debug, Default)]
pub struct MemoryReviewStore {
    records: RwLock<HashMap<String, CardReviewRecord>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the record for a card, returning it if present.
    ///
    /// Not part of [`ReviewStore`]: the scheduler never deletes records.
    /// Deletion is a store-level concern tied to flashcard-set deletion.
    pub fn remove(&self, card_id: &str) -> Option<CardReviewRecord> {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(card_id)
    }
}

impl ReviewStore for MemoryReviewStore {
    fn get(&self, card_id: &str) -> Result<Option<CardReviewRecord>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(card_id).cloned())
    }

    fn put(&self, record: CardReviewRecord) -> Result<()> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert(record.card_id.clone(), record);
        Ok(())
    }

    fn all(&self) -> Result<Vec<CardReviewRecord>> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.values().cloned().collect())
    }
}
