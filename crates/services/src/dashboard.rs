use std::sync::Arc;

use vocab_core::model::{MasteryMap, MasteryScore, StudySession, Word};

use crate::progress_store::ProgressStore;
use crate::word_source::WordSource;

/// A word paired with its current score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordProgress {
    pub word: Word,
    pub score: MasteryScore,
}

/// Snapshot backing the dashboard view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    words: Vec<Word>,
    mastery: MasteryMap,
    last_session: Option<StudySession>,
}

impl DashboardStats {
    #[must_use]
    pub fn new(words: Vec<Word>, mastery: MasteryMap, last_session: Option<StudySession>) -> Self {
        Self {
            words,
            mastery,
            last_session,
        }
    }

    #[must_use]
    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }

    #[must_use]
    pub fn total_words(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn mastered_words(&self) -> usize {
        self.mastery
            .mastered_count(self.words.iter().map(|word| word.id))
    }

    #[must_use]
    pub fn remaining_words(&self) -> usize {
        self.total_words().saturating_sub(self.mastered_words())
    }

    /// Sum of scores over the fetched words as a share of the maximum.
    #[must_use]
    pub fn overall_progress(&self) -> f64 {
        self.mastery
            .overall_progress(self.words.iter().map(|word| word.id))
    }

    /// The last stored session, if it studied at least one word.
    #[must_use]
    pub fn last_session(&self) -> Option<&StudySession> {
        self.last_session
            .as_ref()
            .filter(|session| session.has_answers())
    }

    /// The first `limit` words with their scores.
    #[must_use]
    pub fn preview(&self, limit: usize) -> Vec<WordProgress> {
        self.words
            .iter()
            .take(limit)
            .map(|word| WordProgress {
                word: word.clone(),
                score: self.mastery.score(word.id),
            })
            .collect()
    }

    /// How many words `preview(limit)` leaves out.
    #[must_use]
    pub fn hidden_count(&self, limit: usize) -> usize {
        self.words.len().saturating_sub(limit)
    }

    #[must_use]
    pub fn mastery(&self) -> &MasteryMap {
        &self.mastery
    }
}

/// Loads dashboard data and applies dashboard actions.
#[derive(Clone)]
pub struct DashboardService {
    words: Arc<dyn WordSource>,
    progress: ProgressStore,
}

impl DashboardService {
    #[must_use]
    pub fn new(words: Arc<dyn WordSource>, progress: ProgressStore) -> Self {
        Self { words, progress }
    }

    pub async fn load(&self) -> DashboardStats {
        let words = self.words.fetch_words().await;
        let mastery = self.progress.get_mastery().await;
        let last_session = self.progress.get_session().await;
        DashboardStats::new(words, mastery, last_session)
    }

    /// Clear every mastery score.
    pub async fn reset_progress(&self) {
        self.progress.reset_mastery().await;
    }
}
