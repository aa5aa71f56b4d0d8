use services::{ProgressStore, StudyError, StudyOrder, StudyRun, StudyService, StudyStep};
use vocab_core::model::{Answer, AppSettings, MasteryMap, MasteryScore, StudySession};

use crate::views::ViewError;

use super::dashboard_vm::tier_class;
use super::time_fmt::{format_clock, format_percent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyIntent {
    Flip,
    Answer(Answer),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyOutcome {
    Continue,
    Completed { correct: u32, total: u32 },
}

#[must_use]
pub fn completion_message(correct: u32, total: u32) -> String {
    format!("Congratulations! You answered {correct}/{total} correctly.")
}

/// Everything the flip-card renders for the current word.
#[derive(Clone, Debug, PartialEq)]
pub struct FlashcardFace {
    pub front: String,
    pub back: String,
    pub flipped: bool,
    pub answered: bool,
    pub position_label: String,
    pub run_percent: f64,
    pub score_label: String,
    pub word_percent: f64,
    pub word_percent_label: String,
    pub tier_class: &'static str,
}

/// Card-level state for one study run.
#[derive(Clone, Debug)]
pub struct StudyVm {
    run: StudyRun,
    mastery: MasteryMap,
    show_target_first: bool,
    flipped: bool,
}

impl StudyVm {
    #[must_use]
    pub fn new(run: StudyRun, mastery: MasteryMap, settings: AppSettings) -> Self {
        Self {
            run,
            mastery,
            show_target_first: settings.show_target_first,
            flipped: false,
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Turn the card over. Ignored once the card has been answered.
    pub fn flip(&mut self) {
        if !self.run.is_answered() {
            self.flipped = !self.flipped;
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.run.is_answered()
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.run.current_index() + 1, self.run.total())
    }

    #[must_use]
    pub fn tally_label(&self) -> String {
        let session = self.run.session();
        format!(
            "✓ {} | ✗ {}",
            session.correct_answers(),
            session.wrong_answers()
        )
    }

    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_clock(self.run.session().session_time_seconds())
    }

    /// How far through the run the current card is, `0.0..=100.0`.
    #[must_use]
    pub fn run_percent(&self) -> f64 {
        let total = self.run.total().max(1);
        (self.run.current_index() + 1) as f64 / total as f64 * 100.0
    }

    #[must_use]
    pub fn word_score(&self) -> MasteryScore {
        self.run
            .current_word()
            .map_or(MasteryScore::MIN, |word| self.mastery.score(word.id))
    }

    /// `None` once the run is completed.
    #[must_use]
    pub fn face(&self) -> Option<FlashcardFace> {
        let word = self.run.current_word()?;
        let score = self.word_score();
        Some(FlashcardFace {
            front: word.front_text(self.show_target_first).to_string(),
            back: word.back_text(self.show_target_first).to_string(),
            flipped: self.flipped,
            answered: self.run.is_answered(),
            position_label: self.position_label(),
            run_percent: self.run_percent(),
            score_label: score.to_string(),
            word_percent: score.percent(),
            word_percent_label: format_percent(score.percent()),
            tier_class: tier_class(score.tier()),
        })
    }

    /// Record the answer for the current card and remember its new score.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the run rejects the answer.
    pub async fn answer(&mut self, study: &StudyService, answer: Answer) -> Result<(), ViewError> {
        let outcome = study
            .answer(&mut self.run, answer)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "answer rejected");
                ViewError::Unknown
            })?;
        self.mastery.set(outcome.word_id, outcome.score);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the current card is still unanswered.
    pub async fn advance(&mut self, study: &StudyService) -> Result<StudyOutcome, ViewError> {
        let step = study.advance(&mut self.run).await.map_err(|err| {
            tracing::warn!(error = %err, "advance rejected");
            ViewError::Unknown
        })?;
        self.flipped = false;
        Ok(match step {
            StudyStep::Next { .. } => StudyOutcome::Continue,
            StudyStep::Completed(session) => StudyOutcome::Completed {
                correct: session.correct_answers(),
                total: session.total_words(),
            },
        })
    }

    /// Recompute elapsed time; the snapshot still needs persisting.
    pub fn refresh_elapsed(&mut self, study: &StudyService) -> Option<StudySession> {
        study.refresh_elapsed(&mut self.run)
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyWords` when there is nothing to study.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_study(
    study: &StudyService,
    progress: &ProgressStore,
    order: StudyOrder,
) -> Result<StudyVm, ViewError> {
    let settings = progress.get_settings().await;
    let mastery = progress.get_mastery().await;
    let run = match study.begin(order).await {
        Ok(run) => run,
        Err(StudyError::Empty) => return Err(ViewError::EmptyWords),
        Err(_) => return Err(ViewError::Unknown),
    };
    Ok(StudyVm::new(run, mastery, settings))
}
