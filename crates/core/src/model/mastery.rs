use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::ids::WordId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MasteryScoreError {
    #[error("mastery score {0} is outside 0..=5")]
    OutOfRange(i64),
}

//
// ─── ANSWER ───────────────────────────────────────────────────────────────────
//

/// How the learner answered a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    Correct,
    Incorrect,
}

impl Answer {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Answer::Correct)
    }
}

impl From<bool> for Answer {
    fn from(correct: bool) -> Self {
        if correct {
            Answer::Correct
        } else {
            Answer::Incorrect
        }
    }
}

//
// ─── SCORE ────────────────────────────────────────────────────────────────────
//

/// Familiarity with one word, always within `0..=5`.
///
/// Persisted values outside the range are clamped on decode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "i64", into = "u8")]
pub struct MasteryScore(u8);

impl MasteryScore {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(5);

    /// Score at or above which a word counts as mastered.
    pub const MASTERED_THRESHOLD: u8 = 4;
    /// Score at or above which a word is considered in progress.
    pub const LEARNING_THRESHOLD: u8 = 2;

    /// # Errors
    ///
    /// Returns `MasteryScoreError::OutOfRange` for values above 5.
    pub fn new(value: u8) -> Result<Self, MasteryScoreError> {
        if value > Self::MAX.0 {
            return Err(MasteryScoreError::OutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Clamp an arbitrary integer into the valid range.
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX.0))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// `+1` for a correct answer (capped at 5), `-1` for a wrong one (floored at 0).
    #[must_use]
    pub fn apply(self, answer: Answer) -> Self {
        match answer {
            Answer::Correct => Self(self.0.saturating_add(1).min(Self::MAX.0)),
            Answer::Incorrect => Self(self.0.saturating_sub(1)),
        }
    }

    #[must_use]
    pub fn tier(self) -> MasteryTier {
        if self.0 >= Self::MASTERED_THRESHOLD {
            MasteryTier::Mastered
        } else if self.0 >= Self::LEARNING_THRESHOLD {
            MasteryTier::Learning
        } else {
            MasteryTier::Weak
        }
    }

    #[must_use]
    pub fn is_mastered(self) -> bool {
        self.tier() == MasteryTier::Mastered
    }

    /// Share of the maximum score, `0.0..=100.0`.
    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX.0) * 100.0
    }
}

impl From<i64> for MasteryScore {
    fn from(value: i64) -> Self {
        Self::saturating(value)
    }
}

impl From<MasteryScore> for u8 {
    fn from(score: MasteryScore) -> Self {
        score.0
    }
}

impl fmt::Display for MasteryScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

/// Coarse grouping of scores used for colouring and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MasteryTier {
    /// 0 or 1.
    Weak,
    /// 2 or 3.
    Learning,
    /// 4 or 5.
    Mastered,
}

//
// ─── MAP ──────────────────────────────────────────────────────────────────────
//

/// Per-word mastery scores. Words never answered are absent and read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasteryMap(BTreeMap<WordId, MasteryScore>);

impl MasteryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self, id: WordId) -> MasteryScore {
        self.0.get(&id).copied().unwrap_or_default()
    }

    pub fn set(&mut self, id: WordId, score: MasteryScore) {
        self.0.insert(id, score);
    }

    /// Apply an answer to a word's score and return the new score.
    pub fn record(&mut self, id: WordId, answer: Answer) -> MasteryScore {
        let next = self.score(id).apply(answer);
        self.0.insert(id, next);
        next
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, MasteryScore)> + '_ {
        self.0.iter().map(|(id, score)| (*id, *score))
    }

    /// Number of the given words whose score is at least the mastered threshold.
    pub fn mastered_count<I>(&self, ids: I) -> usize
    where
        I: IntoIterator<Item = WordId>,
    {
        ids.into_iter()
            .filter(|id| self.score(*id).is_mastered())
            .count()
    }

    /// Sum of scores over the given words relative to the maximum, `0.0..=100.0`.
    ///
    /// Returns 0 for an empty selection.
    pub fn overall_progress<I>(&self, ids: I) -> f64
    where
        I: IntoIterator<Item = WordId>,
    {
        let (count, total) = ids
            .into_iter()
            .fold((0_u64, 0_u64), |(count, total), id| {
                (count + 1, total + u64::from(self.score(id).value()))
            });
        if count == 0 {
            return 0.0;
        }
        let max = count * u64::from(MasteryScore::MAX.value());
        #[allow(clippy::cast_precision_loss)]
        let percent = total as f64 / max as f64 * 100.0;
        percent
    }
}

impl FromIterator<(WordId, MasteryScore)> for MasteryMap {
    fn from_iter<T: IntoIterator<Item = (WordId, MasteryScore)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
