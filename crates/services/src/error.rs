//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use vocab_core::model::StudySessionError;

/// Errors from the word list endpoint. Callers of `WordSource` never see
/// these; they are logged and replaced by the fallback list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordSourceError {
    #[error("invalid word list base URL: {0}")]
    InvalidUrl(String),
    #[error("word list request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("word list response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while driving a study run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyError {
    #[error("no words available for a study run")]
    Empty,
    #[error("study run has not started")]
    NotStarted,
    #[error("study run already started")]
    AlreadyStarted,
    #[error("study run already completed")]
    Completed,
    #[error("current card was already answered")]
    AlreadyAnswered,
    #[error("current card has not been answered yet")]
    NotAnswered,
    #[error(transparent)]
    Session(#[from] StudySessionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    WordSource(#[from] WordSourceError),
}
