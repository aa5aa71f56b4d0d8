mod dashboard;
mod flashcard;
mod flashcards;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use flashcard::Flashcard;
pub use flashcards::FlashcardsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
