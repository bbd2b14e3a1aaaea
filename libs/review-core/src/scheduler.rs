//! Review scheduling operations over a [`ReviewStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::format;
use crate::sm2::Sm2;
use crate::store::ReviewStore;
use crate::types::{CardReviewRecord, Feedback, KnowledgeLevel, ReviewStats};

/// Window used for the upcoming-cards count in [`ReviewStats`].
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 3;

/// Scheduler over a review store.
///
/// Records are created lazily: querying a card that has no record yields
/// the initial one without persisting it, and nothing here ever overwrites
/// an existing record with a fresh initial state.
pub struct ReviewScheduler<S> {
    sm2: Sm2,
    store: S,
    // Feedback is a read-modify-write; a per-card lock keeps two
    // concurrent feedback events for the same card from losing an update.
    card_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: ReviewStore> ReviewScheduler<S> {
    pub fn new(store: S) -> Self {
        Self::with_sm2(Sm2::default(), store)
    }

    pub fn with_sm2(sm2: Sm2, store: S) -> Self {
        Self {
            sm2,
            store,
            card_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current record for a card, or the initial one if none exists yet.
    pub fn record(&self, card_id: &str, now: DateTime<Utc>) -> Result<CardReviewRecord> {
        Ok(self
            .store
            .get(card_id)?
            .unwrap_or_else(|| self.sm2.initial_record(card_id, now)))
    }

    /// Apply a feedback signal to a card and persist the updated record.
    pub fn process_feedback(
        &self,
        card_id: &str,
        feedback: Feedback,
        now: DateTime<Utc>,
    ) -> Result<CardReviewRecord> {
        let lock = self.card_lock(card_id);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let current = self.record(card_id, now)?;
        let updated = self.sm2.apply(&current, feedback, now);
        self.store.put(updated.clone())?;
        Ok(updated)
    }

    /// Whether a card is due at `now`. Unknown cards are due immediately.
    pub fn is_due(&self, card_id: &str, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.record(card_id, now)?.is_due(now))
    }

    /// Identifiers of every card due at `now`, soonest first.
    ///
    /// Computed fresh from a full store snapshot on each call.
    pub fn due_cards(&self, now: DateTime<Utc>) -> Result<Vec<String>> {
        let mut due: Vec<CardReviewRecord> = self
            .store
            .all()?
            .into_iter()
            .filter(|r| r.is_due(now))
            .collect();
        due.sort_by(|a, b| {
            a.next_review_date
                .cmp(&b.next_review_date)
                .then_with(|| a.card_id.cmp(&b.card_id))
        });
        Ok(due.into_iter().map(|r| r.card_id).collect())
    }

    /// Identifiers of cards that become due within `window_days` of `now`,
    /// soonest first. Disjoint from [`due_cards`](Self::due_cards): anything
    /// already due is excluded.
    pub fn upcoming_cards(&self, now: DateTime<Utc>, window_days: i64) -> Result<Vec<String>> {
        let horizon = now + Duration::days(window_days);
        let mut upcoming: Vec<CardReviewRecord> = self
            .store
            .all()?
            .into_iter()
            .filter(|r| r.next_review_date > now && r.next_review_date <= horizon)
            .collect();
        upcoming.sort_by(|a, b| {
            a.next_review_date
                .cmp(&b.next_review_date)
                .then_with(|| a.card_id.cmp(&b.card_id))
        });
        Ok(upcoming.into_iter().map(|r| r.card_id).collect())
    }

    /// Aggregate counts over every known record.
    pub fn stats(&self, now: DateTime<Utc>) -> Result<ReviewStats> {
        let records = self.store.all()?;
        let horizon = now + Duration::days(DEFAULT_UPCOMING_WINDOW_DAYS);

        let mut stats = ReviewStats {
            total_cards: records.len(),
            ..ReviewStats::default()
        };
        for record in &records {
            match record.knowledge_level {
                KnowledgeLevel::New => stats.new_cards += 1,
                KnowledgeLevel::Learning => stats.learning_cards += 1,
                KnowledgeLevel::Reviewing => stats.reviewing_cards += 1,
                KnowledgeLevel::Mastered => stats.mastered_cards += 1,
            }
            if record.is_due(now) {
                stats.due_cards += 1;
            } else if record.next_review_date <= horizon {
                stats.upcoming_cards += 1;
            }
        }
        Ok(stats)
    }

    /// Human-readable time until a card's next review.
    pub fn describe_next_review(&self, card_id: &str, now: DateTime<Utc>) -> Result<String> {
        let record = self.record(card_id, now)?;
        Ok(format::next_review_text(&record, now))
    }

    /// Human-readable knowledge level for a card.
    pub fn describe_knowledge_level(&self, card_id: &str, now: DateTime<Utc>) -> Result<String> {
        Ok(self.record(card_id, now)?.knowledge_level.label().to_string())
    }

    fn card_lock(&self, card_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.card_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks
            .entry(card_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
