//! In-memory record storage

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::models::*;

/// In-memory CRUD store for users, flashcard sets, flashcards, and quiz
/// scores. Integer ids are handed out monotonically per record type.
///
/// Referential integrity: a flashcard belongs to exactly one set, a set to
/// exactly one user. Deleting a set cascades to its flashcards.
#[derive(Debug, Default)]
pub struct Storage {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    flashcards: HashMap<i64, Flashcard>,
    sets: HashMap<i64, FlashcardSet>,
    quiz_scores: HashMap<i64, QuizScore>,
    next_user_id: i64,
    next_flashcard_id: i64,
    next_set_id: i64,
    next_quiz_score_id: i64,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    // === User Repository ===

    pub fn get_user(&self, id: i64) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn get_user_by_external_uid(&self, external_uid: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.external_uid.as_deref() == Some(external_uid))
            .cloned()
    }

    pub fn create_user(
        &self,
        username: String,
        email: String,
        password: Option<String>,
        display_name: Option<String>,
        photo_url: Option<String>,
        external_uid: Option<String>,
    ) -> User {
        let mut inner = self.write();
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username,
            email,
            password,
            display_name,
            photo_url,
            external_uid,
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    // === Flashcard Repository ===

    pub fn create_flashcard(&self, set_id: i64, card: NewCard) -> Flashcard {
        let mut inner = self.write();
        inner.next_flashcard_id += 1;
        let flashcard = Flashcard {
            id: inner.next_flashcard_id,
            set_id,
            question: card.question,
            answer: card.answer,
            background_color: card.background_color,
            text_color: card.text_color,
            font: card.font,
            image_url: card.image_url,
            difficulty: card.difficulty,
            tags: card.tags,
        };
        inner.flashcards.insert(flashcard.id, flashcard.clone());
        flashcard
    }

    pub fn get_flashcards_by_set(&self, set_id: i64) -> Vec<Flashcard> {
        let mut cards: Vec<Flashcard> = self
            .read()
            .flashcards
            .values()
            .filter(|c| c.set_id == set_id)
            .cloned()
            .collect();
        cards.sort_by_key(|c| c.id);
        cards
    }

    // === Flashcard Set Repository ===

    pub fn create_set(&self, request: &CreateSetRequest) -> FlashcardSet {
        let mut inner = self.write();
        inner.next_set_id += 1;
        let set = FlashcardSet {
            id: inner.next_set_id,
            user_id: request.user_id,
            title: request.title.clone(),
            original_question: request.original_question.clone(),
            original_answer: request.original_answer.clone(),
            card_count: request.flashcards.len(),
            created_at: Utc::now(),
            description: request.description.clone(),
            category: request.category.clone(),
            is_public: request.is_public,
            default_card_style: request.default_card_style.clone(),
        };
        inner.sets.insert(set.id, set.clone());
        set
    }

    pub fn get_set(&self, id: i64) -> Option<FlashcardSet> {
        self.read().sets.get(&id).cloned()
    }

    /// Sets for a user, newest first.
    pub fn get_sets_by_user(&self, user_id: i64) -> Vec<FlashcardSet> {
        let mut sets: Vec<FlashcardSet> = self
            .read()
            .sets
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sets
    }

    /// Delete a set and its flashcards. Returns the ids of the deleted
    /// cards so the caller can drop their review records too.
    pub fn delete_set(&self, id: i64) -> Vec<i64> {
        let mut inner = self.write();
        inner.sets.remove(&id);

        let card_ids: Vec<i64> = inner
            .flashcards
            .values()
            .filter(|c| c.set_id == id)
            .map(|c| c.id)
            .collect();
        for card_id in &card_ids {
            inner.flashcards.remove(card_id);
        }
        card_ids
    }

    // === Quiz Score Repository ===

    pub fn create_quiz_score(&self, request: &CreateQuizScoreRequest) -> QuizScore {
        let mut inner = self.write();
        inner.next_quiz_score_id += 1;
        let score = QuizScore {
            id: inner.next_quiz_score_id,
            user_id: request.user_id,
            set_id: request.set_id,
            score: request.score,
            total_questions: request.total_questions,
            created_at: Utc::now(),
        };
        inner.quiz_scores.insert(score.id, score.clone());
        score
    }

    /// Score history for a user, newest first.
    pub fn get_quiz_scores_by_user(&self, user_id: i64) -> Vec<QuizScore> {
        let mut scores: Vec<QuizScore> = self
            .read()
            .quiz_scores
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        scores
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_card(question: &str) -> NewCard {
        NewCard {
            question: question.to_string(),
            answer: "answer".to_string(),
            background_color: None,
            text_color: None,
            font: None,
            image_url: None,
            difficulty: None,
            tags: vec![],
        }
    }

    fn set_request(user_id: i64, cards: Vec<NewCard>) -> CreateSetRequest {
        CreateSetRequest {
            user_id,
            title: "Test set".to_string(),
            original_question: "What is borrowing?".to_string(),
            original_answer: "A reference without ownership.".to_string(),
            flashcards: cards,
            description: None,
            category: None,
            is_public: false,
            default_card_style: None,
        }
    }

    #[test]
    fn user_lookup_by_each_key() {
        let storage = Storage::new();
        let user = storage.create_user(
            "alice".to_string(),
            "alice@example.com".to_string(),
            None,
            None,
            None,
            Some("uid-1".to_string()),
        );

        assert_eq!(storage.get_user(user.id).unwrap().id, user.id);
        assert_eq!(storage.get_user_by_username("alice").unwrap().id, user.id);
        assert_eq!(storage.get_user_by_email("alice@example.com").unwrap().id, user.id);
        assert_eq!(storage.get_user_by_external_uid("uid-1").unwrap().id, user.id);
        assert!(storage.get_user_by_username("bob").is_none());
    }

    #[test]
    fn ids_are_monotonic() {
        let storage = Storage::new();
        let first = storage.create_user("a".into(), "a@x.com".into(), None, None, None, None);
        let second = storage.create_user("b".into(), "b@x.com".into(), None, None, None, None);
        assert!(second.id > first.id);
    }

    #[test]
    fn set_deletion_cascades_to_cards() {
        let storage = Storage::new();
        let request = set_request(1, vec![new_card("q1"), new_card("q2")]);
        let set = storage.create_set(&request);
        for card in request.flashcards {
            storage.create_flashcard(set.id, card);
        }

        let other = storage.create_set(&set_request(1, vec![new_card("q3")]));
        storage.create_flashcard(other.id, new_card("q3"));

        let deleted = storage.delete_set(set.id);
        assert_eq!(deleted.len(), 2);
        assert!(storage.get_set(set.id).is_none());
        assert!(storage.get_flashcards_by_set(set.id).is_empty());
        // The other set is untouched.
        assert_eq!(storage.get_flashcards_by_set(other.id).len(), 1);
    }

    #[test]
    fn sets_list_newest_first() {
        let storage = Storage::new();
        let older = storage.create_set(&set_request(7, vec![]));
        let newer = storage.create_set(&set_request(7, vec![]));
        storage.create_set(&set_request(8, vec![]));

        let sets = storage.get_sets_by_user(7);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].id, newer.id);
        assert_eq!(sets[1].id, older.id);
    }

    #[test]
    fn quiz_scores_list_newest_first_per_user() {
        let storage = Storage::new();
        for score in [3, 5] {
            storage.create_quiz_score(&CreateQuizScoreRequest {
                user_id: 1,
                set_id: 1,
                score,
                total_questions: 5,
            });
        }
        storage.create_quiz_score(&CreateQuizScoreRequest {
            user_id: 2,
            set_id: 1,
            score: 4,
            total_questions: 5,
        });

        let scores = storage.get_quiz_scores_by_user(1);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].score, 5);
        assert_eq!(scores[1].score, 3);
    }
}
