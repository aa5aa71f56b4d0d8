mod order;
mod run;
mod service;

pub use order::{StudyOrder, order_words, order_words_with};
pub use run::{StudyRun, StudyStep};
pub use service::{AnswerOutcome, StudyService};
