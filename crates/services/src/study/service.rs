use std::sync::Arc;

use tokio::sync::Mutex;
use vocab_core::model::{Answer, MasteryScore, StudySession, WordId};

use crate::error::StudyError;
use crate::progress_store::ProgressStore;
use crate::study::order::{StudyOrder, order_words};
use crate::study::run::{StudyRun, StudyStep};
use crate::word_source::WordSource;
use crate::Clock;

/// Result of answering the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub word_id: WordId,
    pub score: MasteryScore,
}

/// Drives study runs against the word source and the progress store.
///
/// Every counter change is persisted as the current session, so an abandoned
/// run still leaves its last state behind. Session writes are serialised so
/// a late timer snapshot never lands on top of newer counters.
#[derive(Clone)]
pub struct StudyService {
    clock: Clock,
    words: Arc<dyn WordSource>,
    progress: ProgressStore,
    session_writes: Arc<Mutex<()>>,
}

impl StudyService {
    #[must_use]
    pub fn new(clock: Clock, words: Arc<dyn WordSource>, progress: ProgressStore) -> Self {
        Self {
            clock,
            words,
            progress,
            session_writes: Arc::new(Mutex::new(())),
        }
    }

    /// Fetch words, order them, and start a run with a fresh persisted session.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` when the source has no words; nothing is
    /// persisted in that case.
    pub async fn begin(&self, order: StudyOrder) -> Result<StudyRun, StudyError> {
        let words = self.words.fetch_words().await;
        if words.is_empty() {
            tracing::debug!("no words to study");
            return Err(StudyError::Empty);
        }

        let mut run = StudyRun::new(order_words(words, order), order)?;
        let session = run.start(self.clock.now())?;
        let _writes = self.session_writes.lock().await;
        self.progress.set_session(session).await;
        tracing::debug!(total = run.total(), ?order, "study run started");
        Ok(run)
    }

    /// Record an answer for the current card: update its mastery score and
    /// the session counters.
    ///
    /// # Errors
    ///
    /// Returns `StudyError` if the run does not expect an answer.
    pub async fn answer(
        &self,
        run: &mut StudyRun,
        answer: Answer,
    ) -> Result<AnswerOutcome, StudyError> {
        let word_id = run.record(answer)?.id;
        run.tick(self.clock.now());
        let score = self.progress.record_answer(word_id, answer).await;
        let _writes = self.session_writes.lock().await;
        self.progress.set_session(run.session()).await;
        Ok(AnswerOutcome { word_id, score })
    }

    /// Move to the next card, or complete the run and persist the final counters.
    ///
    /// # Errors
    ///
    /// Returns `StudyError` if the current card has not been answered or the
    /// run is not in progress.
    pub async fn advance(&self, run: &mut StudyRun) -> Result<StudyStep, StudyError> {
        let step = run.advance(self.clock.now())?;
        if let StudyStep::Completed(session) = &step {
            let _writes = self.session_writes.lock().await;
            self.progress.set_session(session).await;
            tracing::debug!(
                correct = session.correct_answers(),
                total = session.total_words(),
                seconds = session.session_time_seconds(),
                "study run completed"
            );
        }
        Ok(step)
    }

    /// Recompute the elapsed time of a running session and return a snapshot
    /// to persist with `save_tick`.
    pub fn refresh_elapsed(&self, run: &mut StudyRun) -> Option<StudySession> {
        run.tick(self.clock.now())?;
        Some(run.session().clone())
    }

    /// Recompute and persist the elapsed time of a running session.
    pub async fn tick(&self, run: &mut StudyRun) -> Option<u64> {
        let session = self.refresh_elapsed(run)?;
        self.save_tick(&session).await;
        Some(session.session_time_seconds())
    }

    /// Persist a timer snapshot unless the stored session is already
    /// completed or has counted more answers than the snapshot.
    ///
    /// Returns whether the snapshot was written.
    pub async fn save_tick(&self, snapshot: &StudySession) -> bool {
        let _writes = self.session_writes.lock().await;
        let stale = self.progress.get_session().await.is_some_and(|stored| {
            stored.is_completed() || stored.studied_words() > snapshot.studied_words()
        });
        if stale {
            tracing::debug!("stale elapsed-time snapshot dropped");
            return false;
        }
        self.progress.set_session(snapshot).await;
        true
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_source::StaticWordSource;
    use storage::repository::InMemoryStore;
    use vocab_core::model::{MasteryMap, StudyPhase, Word};
    use vocab_core::time::fixed_clock;

    fn words(count: u64) -> Vec<Word> {
        (1..=count)
            .map(|id| Word::new(WordId::new(id), format!("w{id}"), format!("t{id}")).unwrap())
            .collect()
    }

    fn service(words: Vec<Word>) -> StudyService {
        StudyService::new(
            fixed_clock(),
            Arc::new(StaticWordSource::new(words)),
            ProgressStore::new(Arc::new(InMemoryStore::new())),
        )
    }

    #[tokio::test]
    async fn begin_with_no_words_persists_nothing() {
        let svc = service(Vec::new());
        let err = svc.begin(StudyOrder::Sequential).await.unwrap_err();
        assert_eq!(err, StudyError::Empty);
        assert!(svc.progress().get_session().await.is_none());
    }

    #[tokio::test]
    async fn begin_replaces_previous_session() {
        let svc = service(words(2));
        let mut first = svc.begin(StudyOrder::Sequential).await.unwrap();
        svc.answer(&mut first, Answer::Correct).await.unwrap();

        let second = svc.begin(StudyOrder::Shuffled).await.unwrap();
        assert_eq!(second.phase(), StudyPhase::InProgress);
        let stored = svc.progress().get_session().await.unwrap();
        assert_eq!(stored.total_words(), 2);
        assert_eq!(stored.studied_words(), 0);
    }

    #[tokio::test]
    async fn answers_update_scores_and_session() {
        let svc = service(words(2));
        let mut run = svc.begin(StudyOrder::Sequential).await.unwrap();

        let outcome = svc.answer(&mut run, Answer::Correct).await.unwrap();
        assert_eq!(outcome.word_id, WordId::new(1));
        assert_eq!(outcome.score.value(), 1);
        let stored = svc.progress().get_session().await.unwrap();
        assert_eq!(stored.correct_answers(), 1);
        assert_eq!(stored.studied_words(), 1);

        assert_eq!(
            svc.advance(&mut run).await.unwrap(),
            StudyStep::Next { index: 1 }
        );
        let outcome = svc.answer(&mut run, Answer::Incorrect).await.unwrap();
        assert_eq!(outcome.word_id, WordId::new(2));
        assert_eq!(outcome.score.value(), 0);

        let StudyStep::Completed(session) = svc.advance(&mut run).await.unwrap() else {
            panic!("run should complete after the last word");
        };
        assert_eq!(session.correct_answers(), 1);
        assert_eq!(session.wrong_answers(), 1);
        assert_eq!(svc.progress().get_session().await, Some(session));

        let mastery: MasteryMap = svc.progress().get_mastery().await;
        assert_eq!(mastery.score(WordId::new(1)).value(), 1);
        assert_eq!(mastery.score(WordId::new(2)).value(), 0);
        assert_eq!(mastery.len(), 2);
    }

    #[tokio::test]
    async fn shuffled_run_covers_every_word_once() {
        let svc = service(words(12));
        let run = svc.begin(StudyOrder::Shuffled).await.unwrap();
        let mut ids: Vec<_> = run.words().iter().map(|word| word.id).collect();
        ids.sort();
        assert_eq!(ids, (1..=12).map(WordId::new).collect::<Vec<_>>());
        assert_eq!(run.order(), StudyOrder::Shuffled);
    }

    #[tokio::test]
    async fn rejected_answer_leaves_scores_untouched() {
        let svc = service(words(1));
        let mut run = svc.begin(StudyOrder::Sequential).await.unwrap();
        svc.answer(&mut run, Answer::Correct).await.unwrap();
        let err = svc.answer(&mut run, Answer::Correct).await.unwrap_err();
        assert_eq!(err, StudyError::AlreadyAnswered);
        let mastery = svc.progress().get_mastery().await;
        assert_eq!(mastery.score(WordId::new(1)).value(), 1);
    }

    #[tokio::test]
    async fn tick_persists_elapsed_time_while_running() {
        let svc = service(words(1));
        let mut run = svc.begin(StudyOrder::Sequential).await.unwrap();
        assert_eq!(svc.tick(&mut run).await, Some(0));
        svc.answer(&mut run, Answer::Correct).await.unwrap();
        svc.advance(&mut run).await.unwrap();
        assert_eq!(svc.tick(&mut run).await, None);
    }

    #[tokio::test]
    async fn refresh_elapsed_snapshots_without_persisting() {
        let mut clock = fixed_clock();
        let progress = ProgressStore::new(Arc::new(InMemoryStore::new()));
        let words: Arc<dyn WordSource> = Arc::new(StaticWordSource::new(words(2)));
        let start = StudyService::new(clock, Arc::clone(&words), progress.clone());
        let mut run = start.begin(StudyOrder::Sequential).await.unwrap();

        clock.advance(chrono::Duration::seconds(42));
        let later = StudyService::new(clock, words, progress.clone());
        let snapshot = later.refresh_elapsed(&mut run).unwrap();
        assert_eq!(snapshot.session_time_seconds(), 42);
        assert_eq!(
            progress.get_session().await.unwrap().session_time_seconds(),
            0
        );

        assert!(later.save_tick(&snapshot).await);
        assert_eq!(progress.get_session().await, Some(snapshot));
    }

    #[tokio::test]
    async fn late_tick_never_overwrites_completed_session() {
        let svc = service(words(1));
        let mut run = svc.begin(StudyOrder::Sequential).await.unwrap();
        let snapshot = svc.refresh_elapsed(&mut run).unwrap();

        svc.answer(&mut run, Answer::Correct).await.unwrap();
        let StudyStep::Completed(done) = svc.advance(&mut run).await.unwrap() else {
            panic!("single-word run should complete");
        };

        assert!(!svc.save_tick(&snapshot).await);
        let stored = svc.progress().get_session().await.unwrap();
        assert!(stored.is_completed());
        assert_eq!(stored, done);
    }

    #[tokio::test]
    async fn late_tick_never_rolls_back_counters() {
        let svc = service(words(3));
        let mut run = svc.begin(StudyOrder::Sequential).await.unwrap();
        let snapshot = svc.refresh_elapsed(&mut run).unwrap();

        svc.answer(&mut run, Answer::Incorrect).await.unwrap();
        assert!(!svc.save_tick(&snapshot).await);
        let stored = svc.progress().get_session().await.unwrap();
        assert_eq!(stored.studied_words(), 1);
        assert_eq!(stored.wrong_answers(), 1);
    }
}
