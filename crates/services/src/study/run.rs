use chrono::{DateTime, Utc};

use vocab_core::model::{Answer, StudyPhase, StudySession, Word};
use vocab_core::time::elapsed_seconds;

use crate::error::StudyError;
use crate::study::order::StudyOrder;

/// Where a run stands after `advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyStep {
    /// Moved on to the card at `index`.
    Next { index: usize },
    /// The sequence is exhausted; carries the final counters.
    Completed(StudySession),
}

/// One pass through an ordered word list.
///
/// `NotStarted -> InProgress -> Completed`. Each card is answered once and
/// then advanced past; the counters live in the embedded `StudySession`.
#[derive(Debug, Clone)]
pub struct StudyRun {
    words: Vec<Word>,
    order: StudyOrder,
    phase: StudyPhase,
    current: usize,
    answered: bool,
    started_at: Option<DateTime<Utc>>,
    session: StudySession,
}

impl StudyRun {
    /// Prepare a run over already-ordered words.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Empty` when there are no words, so a run over an
    /// empty list can never reach `InProgress`.
    pub fn new(words: Vec<Word>, order: StudyOrder) -> Result<Self, StudyError> {
        if words.is_empty() {
            return Err(StudyError::Empty);
        }
        Ok(Self {
            words,
            order,
            phase: StudyPhase::NotStarted,
            current: 0,
            answered: false,
            started_at: None,
            session: StudySession::default(),
        })
    }

    /// Reset the counters and begin timing.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::AlreadyStarted` unless the run is `NotStarted`.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<&StudySession, StudyError> {
        if self.phase != StudyPhase::NotStarted {
            return Err(StudyError::AlreadyStarted);
        }
        self.session = StudySession::start(self.words.len())?;
        self.started_at = Some(now);
        self.current = 0;
        self.answered = false;
        self.phase = StudyPhase::InProgress;
        Ok(&self.session)
    }

    /// Count an answer for the current card.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotStarted`, `StudyError::Completed`, or
    /// `StudyError::AlreadyAnswered` when no answer is expected.
    pub fn record(&mut self, answer: Answer) -> Result<&Word, StudyError> {
        self.ensure_in_progress()?;
        if self.answered {
            return Err(StudyError::AlreadyAnswered);
        }
        self.answered = true;
        self.session.record(answer);
        Ok(&self.words[self.current])
    }

    /// Move past the answered card, completing the run after the last one.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::NotAnswered` if the current card is still open, or
    /// a phase error when the run is not in progress.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<StudyStep, StudyError> {
        self.ensure_in_progress()?;
        if !self.answered {
            return Err(StudyError::NotAnswered);
        }
        if self.current + 1 < self.words.len() {
            self.current += 1;
            self.answered = false;
            return Ok(StudyStep::Next {
                index: self.current,
            });
        }

        let elapsed = self.elapsed_at(now);
        self.session.complete(now, elapsed);
        self.phase = StudyPhase::Completed;
        Ok(StudyStep::Completed(self.session.clone()))
    }

    /// Recompute elapsed time. Returns `None` outside `InProgress`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<u64> {
        if self.phase != StudyPhase::InProgress {
            return None;
        }
        let elapsed = self.elapsed_at(now);
        self.session.set_elapsed(elapsed);
        Some(elapsed)
    }

    #[must_use]
    pub fn phase(&self) -> StudyPhase {
        self.phase
    }

    #[must_use]
    pub fn order(&self) -> StudyOrder {
        self.order
    }

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The card on screen; `None` once the run is completed.
    #[must_use]
    pub fn current_word(&self) -> Option<&Word> {
        match self.phase {
            StudyPhase::Completed => None,
            StudyPhase::NotStarted | StudyPhase::InProgress => self.words.get(self.current),
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        self.started_at
            .map_or(0, |started| elapsed_seconds(started, now))
    }

    fn ensure_in_progress(&self) -> Result<(), StudyError> {
        match self.phase {
            StudyPhase::NotStarted => Err(StudyError::NotStarted),
            StudyPhase::InProgress => Ok(()),
            StudyPhase::Completed => Err(StudyError::Completed),
        }
    }
}
