use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::mastery::Answer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudySessionError {
    #[error("studied words ({studied}) does not match answer counts ({sum})")]
    CountMismatch { studied: u32, sum: u32 },

    #[error("too many words for a single session: {len}")]
    TooManyWords { len: usize },
}

/// Lifecycle of a single study run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyPhase {
    NotStarted,
    InProgress,
    Completed,
}

/// Counters for the current study run.
///
/// Only one session is ever stored; starting a new run replaces it.
/// `studied_words` always equals `correct_answers + wrong_answers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PersistedSession")]
pub struct StudySession {
    total_words: u32,
    studied_words: u32,
    correct_answers: u32,
    wrong_answers: u32,
    session_time_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

/// Wire shape accepted when reading a stored session, before the count invariant is checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    total_words: u32,
    #[serde(default)]
    studied_words: u32,
    #[serde(default)]
    correct_answers: u32,
    #[serde(default)]
    wrong_answers: u32,
    #[serde(default, alias = "sessionTime")]
    session_time_seconds: u64,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<PersistedSession> for StudySession {
    type Error = StudySessionError;

    fn try_from(raw: PersistedSession) -> Result<Self, Self::Error> {
        Self::from_persisted(
            raw.total_words,
            raw.studied_words,
            raw.correct_answers,
            raw.wrong_answers,
            raw.session_time_seconds,
            raw.completed_at,
        )
    }
}

impl StudySession {
    /// Fresh counters for a run over `total_words` words.
    ///
    /// # Errors
    ///
    /// Returns `StudySessionError::TooManyWords` if the count does not fit in `u32`.
    pub fn start(total_words: usize) -> Result<Self, StudySessionError> {
        let total_words = u32::try_from(total_words)
            .map_err(|_| StudySessionError::TooManyWords { len: total_words })?;
        Ok(Self {
            total_words,
            ..Self::default()
        })
    }

    /// Rehydrate a session from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `StudySessionError::CountMismatch` if the counters disagree.
    pub fn from_persisted(
        total_words: u32,
        studied_words: u32,
        correct_answers: u32,
        wrong_answers: u32,
        session_time_seconds: u64,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, StudySessionError> {
        let sum = correct_answers.saturating_add(wrong_answers);
        if sum != studied_words {
            return Err(StudySessionError::CountMismatch {
                studied: studied_words,
                sum,
            });
        }
        Ok(Self {
            total_words,
            studied_words,
            correct_answers,
            wrong_answers,
            session_time_seconds,
            completed_at,
        })
    }

    /// Count one answered card.
    pub fn record(&mut self, answer: Answer) {
        match answer {
            Answer::Correct => self.correct_answers = self.correct_answers.saturating_add(1),
            Answer::Incorrect => self.wrong_answers = self.wrong_answers.saturating_add(1),
        }
        self.studied_words = self.correct_answers.saturating_add(self.wrong_answers);
    }

    pub fn set_elapsed(&mut self, seconds: u64) {
        self.session_time_seconds = seconds;
    }

    /// Stamp completion with the final elapsed time.
    pub fn complete(&mut self, at: DateTime<Utc>, elapsed_seconds: u64) {
        self.session_time_seconds = elapsed_seconds;
        self.completed_at = Some(at);
    }

    #[must_use]
    pub fn total_words(&self) -> u32 {
        self.total_words
    }

    #[must_use]
    pub fn studied_words(&self) -> u32 {
        self.studied_words
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn wrong_answers(&self) -> u32 {
        self.wrong_answers
    }

    #[must_use]
    pub fn session_time_seconds(&self) -> u64 {
        self.session_time_seconds
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn has_answers(&self) -> bool {
        self.studied_words > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn record_keeps_studied_in_sync() {
        let mut session = StudySession::start(4).unwrap();
        let answers = [
            Answer::Correct,
            Answer::Incorrect,
            Answer::Correct,
            Answer::Correct,
        ];
        for answer in answers {
            session.record(answer);
            assert_eq!(
                session.studied_words(),
                session.correct_answers() + session.wrong_answers()
            );
        }
        assert_eq!(session.correct_answers(), 3);
        assert_eq!(session.wrong_answers(), 1);
        assert_eq!(session.total_words(), 4);
    }

    #[test]
    fn complete_stamps_time() {
        let mut session = StudySession::start(1).unwrap();
        session.record(Answer::Correct);
        session.complete(fixed_now(), 42);
        assert!(session.is_completed());
        assert_eq!(session.session_time_seconds(), 42);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn json_round_trip_uses_camel_case() {
        let mut session = StudySession::start(2).unwrap();
        session.record(Answer::Incorrect);
        session.set_elapsed(7);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["totalWords"], 2);
        assert_eq!(json["wrongAnswers"], 1);
        assert_eq!(json["sessionTimeSeconds"], 7);
        assert!(json.get("completedAt").is_none());

        let back: StudySession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn decode_accepts_legacy_time_key() {
        let session: StudySession = serde_json::from_str(
            r#"{"totalWords":3,"studiedWords":1,"correctAnswers":1,"wrongAnswers":0,"sessionTime":12}"#,
        )
        .unwrap();
        assert_eq!(session.session_time_seconds(), 12);
    }

    #[test]
    fn decode_rejects_inconsistent_counters() {
        let result = serde_json::from_str::<StudySession>(
            r#"{"totalWords":3,"studiedWords":3,"correctAnswers":1,"wrongAnswers":0,"sessionTimeSeconds":0}"#,
        );
        assert!(result.is_err());
    }
}
