//! SM-2 spaced repetition update rule.
//!
//! Based on SuperMemo 2, adapted to a four-signal feedback vocabulary and
//! a coarse knowledge-level bucket on top of the easiness factor.

use chrono::{DateTime, Duration, Utc};

use crate::types::{CardReviewRecord, Feedback, KnowledgeLevel};

/// Base review intervals in days, indexed by consecutive correct answers.
/// Lookups saturate at the last entry.
pub const BASE_INTERVALS: [i64; 8] = [0, 1, 3, 7, 14, 30, 60, 120];

/// SM-2 update rule with configurable parameters.
///
/// The defaults are load-bearing tuning; changing any of them changes
/// every schedule this produces.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Ease penalty applied on a Confused lapse.
    pub lapse_ease_penalty: f64,
    /// How soon a lapsed card comes back, in hours.
    pub relearn_delay_hours: i64,
    /// Interval multiplier for NotSure feedback (floored, min 1 day).
    pub not_sure_multiplier: f64,
    /// Interval multiplier for Easy feedback (floored).
    pub easy_multiplier: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            lapse_ease_penalty: 0.3,
            relearn_delay_hours: 4,
            not_sure_multiplier: 0.7,
            easy_multiplier: 1.3,
        }
    }
}

impl Sm2 {
    /// Initial record for a card that has never been reviewed.
    ///
    /// Due immediately: `next_review_date` is `now` and
    /// `last_review_date` stays unset until the first feedback arrives.
    pub fn initial_record(&self, card_id: impl Into<String>, now: DateTime<Utc>) -> CardReviewRecord {
        CardReviewRecord {
            card_id: card_id.into(),
            knowledge_level: KnowledgeLevel::New,
            easiness_factor: self.initial_ease,
            consecutive_correct: 0,
            last_review_date: None,
            next_review_date: now,
        }
    }

    /// Compute the next record from a feedback signal. Pure.
    pub fn apply(&self, record: &CardReviewRecord, feedback: Feedback, now: DateTime<Utc>) -> CardReviewRecord {
        let mut next = record.clone();

        if feedback == Feedback::Confused {
            // Lapse: back to Learning and a short relearn window.
            next.consecutive_correct = 0;
            next.knowledge_level = KnowledgeLevel::Learning;
            next.easiness_factor =
                (record.easiness_factor - self.lapse_ease_penalty).max(self.minimum_ease);
            next.next_review_date = now + Duration::hours(self.relearn_delay_hours);
        } else {
            // Remembered to some degree. NotSure still counts toward the
            // streak and the ease adjustment (quality 3), it just never
            // promotes the bucket.
            next.consecutive_correct = record.consecutive_correct + 1;

            let quality = f64::from(feedback.quality());
            next.easiness_factor = (record.easiness_factor
                + (0.1 - (5.0 - quality) * (0.08 + (5.0 - quality) * 0.02)))
                .max(self.minimum_ease);

            if feedback >= Feedback::GotIt {
                next.knowledge_level = record.knowledge_level.promoted();
            }

            let interval = self.interval_days(&next, feedback);
            next.next_review_date = now + Duration::days(interval);
        }

        next.last_review_date = Some(now);
        next
    }

    /// Base interval in days for the post-update level and streak, with
    /// the feedback-strength multiplier applied.
    fn interval_days(&self, record: &CardReviewRecord, feedback: Feedback) -> i64 {
        let index = (record.consecutive_correct as usize).min(BASE_INTERVALS.len() - 1);
        let base = match record.knowledge_level {
            KnowledgeLevel::New => 1,
            KnowledgeLevel::Learning => 3,
            KnowledgeLevel::Reviewing => BASE_INTERVALS[index],
            KnowledgeLevel::Mastered => {
                (BASE_INTERVALS[index] as f64 * record.easiness_factor).round() as i64
            }
        };

        match feedback {
            Feedback::NotSure => ((base as f64 * self.not_sure_multiplier).floor() as i64).max(1),
            Feedback::Easy => (base as f64 * self.easy_multiplier).floor() as i64,
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn record(level: KnowledgeLevel, ease: f64, streak: u32) -> CardReviewRecord {
        CardReviewRecord {
            card_id: "card-1".to_string(),
            knowledge_level: level,
            easiness_factor: ease,
            consecutive_correct: streak,
            last_review_date: Some(now() - Duration::days(1)),
            next_review_date: now(),
        }
    }

    #[test]
    fn initial_record_is_due_immediately() {
        let sm2 = Sm2::default();
        let rec = sm2.initial_record("c1", now());
        assert_eq!(rec.knowledge_level, KnowledgeLevel::New);
        assert_eq!(rec.easiness_factor, 2.5);
        assert_eq!(rec.consecutive_correct, 0);
        assert_eq!(rec.last_review_date, None);
        assert!(rec.is_due(now()));
    }

    #[test]
    fn first_got_it_graduates_new_card() {
        // Scenario: new card, first feedback GotIt. Promotes to Learning,
        // next review 3 days out (Learning base). Quality 4 leaves the
        // ease adjustment at exactly zero.
        let sm2 = Sm2::default();
        let rec = sm2.initial_record("c1", now());
        let next = sm2.apply(&rec, Feedback::GotIt, now());

        assert_eq!(next.knowledge_level, KnowledgeLevel::Learning);
        assert_eq!(next.consecutive_correct, 1);
        assert!((next.easiness_factor - 2.5).abs() < 1e-9);
        assert_eq!(next.last_review_date, Some(now()));
        assert_eq!(next.next_review_date, now() + Duration::days(3));
    }

    #[test]
    fn confused_resets_from_any_level() {
        let sm2 = Sm2::default();
        for level in [
            KnowledgeLevel::New,
            KnowledgeLevel::Learning,
            KnowledgeLevel::Reviewing,
            KnowledgeLevel::Mastered,
        ] {
            let next = sm2.apply(&record(level, 2.5, 4), Feedback::Confused, now());
            assert_eq!(next.knowledge_level, KnowledgeLevel::Learning);
            assert_eq!(next.consecutive_correct, 0);
        }
    }

    #[test]
    fn confused_applies_ease_penalty_and_relearn_window() {
        // Scenario: Reviewing card with a streak gets Confused. Ease drops
        // by 0.3 and the card comes back in 4 hours.
        let sm2 = Sm2::default();
        let next = sm2.apply(&record(KnowledgeLevel::Reviewing, 2.5, 2), Feedback::Confused, now());

        assert_eq!(next.knowledge_level, KnowledgeLevel::Learning);
        assert_eq!(next.consecutive_correct, 0);
        assert!((next.easiness_factor - 2.2).abs() < 1e-9);
        assert_eq!(next.next_review_date, now() + Duration::hours(4));
    }

    #[test]
    fn ease_never_drops_below_minimum() {
        let sm2 = Sm2::default();
        let lapsed = sm2.apply(&record(KnowledgeLevel::Reviewing, 1.35, 2), Feedback::Confused, now());
        assert_eq!(lapsed.easiness_factor, 1.3);

        // The quality-3 adjustment is negative too; clamp must hold there.
        let shaky = sm2.apply(&record(KnowledgeLevel::Reviewing, 1.3, 2), Feedback::NotSure, now());
        assert!(shaky.easiness_factor >= 1.3);
    }

    #[test]
    fn not_sure_grows_streak_without_promotion() {
        let sm2 = Sm2::default();
        let next = sm2.apply(&record(KnowledgeLevel::Learning, 2.5, 1), Feedback::NotSure, now());

        assert_eq!(next.knowledge_level, KnowledgeLevel::Learning);
        assert_eq!(next.consecutive_correct, 2);
        // Quality 3 adjustment: 0.1 - 2*(0.08 + 2*0.02) = -0.14
        assert!((next.easiness_factor - 2.36).abs() < 1e-9);
    }

    #[test]
    fn not_sure_shrinks_interval_with_floor_of_one_day() {
        let sm2 = Sm2::default();
        // Learning base 3 days * 0.7 = 2.1 -> floor 2.
        let next = sm2.apply(&record(KnowledgeLevel::Learning, 2.5, 1), Feedback::NotSure, now());
        assert_eq!(next.next_review_date, now() + Duration::days(2));

        // New base 1 day * 0.7 = 0.7 -> floor 0 -> clamped to 1.
        let next = sm2.apply(&record(KnowledgeLevel::New, 2.5, 0), Feedback::NotSure, now());
        assert_eq!(next.next_review_date, now() + Duration::days(1));
    }

    #[test]
    fn reviewing_interval_follows_streak_table() {
        let sm2 = Sm2::default();
        // GotIt promotes Learning -> Reviewing; streak becomes 3 -> 7 days.
        let next = sm2.apply(&record(KnowledgeLevel::Learning, 2.5, 2), Feedback::GotIt, now());
        assert_eq!(next.knowledge_level, KnowledgeLevel::Reviewing);
        assert_eq!(next.next_review_date, now() + Duration::days(7));
    }

    #[test]
    fn streak_index_saturates_at_longest_interval() {
        // Scenario: Mastered card with a streak past the table's end and
        // Easy feedback. Index clamps to the 120-day entry, scaled by
        // ease, then the Easy multiplier.
        let sm2 = Sm2::default();
        let rec = record(KnowledgeLevel::Mastered, 2.0, 10);
        let next = sm2.apply(&rec, Feedback::Easy, now());

        assert_eq!(next.knowledge_level, KnowledgeLevel::Mastered);
        assert_eq!(next.consecutive_correct, 11);
        // Quality 5: ease 2.0 + 0.1 = 2.1; round(120 * 2.1) = 252;
        // floor(252 * 1.3) = 327.
        assert_eq!(next.next_review_date, now() + Duration::days(327));
    }

    #[test]
    fn easy_promotes_and_stretches_interval() {
        let sm2 = Sm2::default();
        // Easy promotes New -> Learning; base 3 * 1.3 = 3.9 -> floor 3.
        let rec = sm2.initial_record("c1", now());
        let next = sm2.apply(&rec, Feedback::Easy, now());
        assert_eq!(next.knowledge_level, KnowledgeLevel::Learning);
        assert_eq!(next.next_review_date, now() + Duration::days(3));
    }

    #[test]
    fn level_never_decreases_except_via_confused() {
        let sm2 = Sm2::default();
        let mut rec = sm2.initial_record("c1", now());
        let mut previous = rec.knowledge_level;
        for feedback in [
            Feedback::NotSure,
            Feedback::GotIt,
            Feedback::Easy,
            Feedback::GotIt,
            Feedback::Easy,
            Feedback::NotSure,
        ] {
            rec = sm2.apply(&rec, feedback, now());
            assert!(rec.knowledge_level >= previous);
            assert!(rec.knowledge_level <= KnowledgeLevel::Mastered);
            previous = rec.knowledge_level;
        }
    }
}
