use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::WordId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word {id} has an empty source text")]
    EmptySource { id: WordId },
    #[error("word {id} has an empty target text")]
    EmptyTarget { id: WordId },
}

/// One vocabulary pair as delivered by the word list endpoint.
///
/// The wire format uses `sourceText` / `targetText`; older payloads carrying
/// `en` / `tr` decode into the same fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: WordId,
    #[serde(alias = "en")]
    pub source_text: String,
    #[serde(alias = "tr")]
    pub target_text: String,
}

impl Word {
    /// Build a validated word.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if either side is blank after trimming.
    pub fn new(
        id: WordId,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
    ) -> Result<Self, WordError> {
        Self {
            id,
            source_text: source_text.into(),
            target_text: target_text.into(),
        }
        .validate()
    }

    /// Trim both sides and reject blank text.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if either side is blank after trimming.
    pub fn validate(self) -> Result<Self, WordError> {
        let source_text = self.source_text.trim().to_string();
        let target_text = self.target_text.trim().to_string();
        if source_text.is_empty() {
            return Err(WordError::EmptySource { id: self.id });
        }
        if target_text.is_empty() {
            return Err(WordError::EmptyTarget { id: self.id });
        }
        Ok(Self {
            id: self.id,
            source_text,
            target_text,
        })
    }

    /// Text shown on the face of the card before flipping.
    #[must_use]
    pub fn front_text(&self, show_target_first: bool) -> &str {
        if show_target_first {
            &self.target_text
        } else {
            &self.source_text
        }
    }

    /// Text revealed after flipping.
    #[must_use]
    pub fn back_text(&self, show_target_first: bool) -> &str {
        if show_target_first {
            &self.source_text
        } else {
            &self.target_text
        }
    }
}
