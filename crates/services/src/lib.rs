#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod progress_store;
pub mod study;
pub mod word_source;

pub use vocab_core::Clock;

pub use app_services::AppServices;
pub use dashboard::{DashboardService, DashboardStats, WordProgress};
pub use error::{AppServicesError, StudyError, WordSourceError};
pub use progress_store::ProgressStore;
pub use study::{AnswerOutcome, StudyOrder, StudyRun, StudyService, StudyStep, order_words};
pub use word_source::{HttpWordSource, StaticWordSource, WordSource, fallback_words};
