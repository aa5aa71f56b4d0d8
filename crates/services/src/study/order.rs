use rand::Rng;
use rand::seq::SliceRandom;

use vocab_core::model::Word;

/// Order in which a study run presents its words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StudyOrder {
    /// As delivered by the word source.
    #[default]
    Sequential,
    /// Uniformly shuffled.
    Shuffled,
}

impl StudyOrder {
    /// Map the `random` query flag onto an order.
    #[must_use]
    pub fn from_random_flag(random: bool) -> Self {
        if random {
            Self::Shuffled
        } else {
            Self::Sequential
        }
    }

    #[must_use]
    pub fn is_shuffled(self) -> bool {
        matches!(self, Self::Shuffled)
    }
}

/// Arrange `words` for a run, shuffling with the thread-local RNG when requested.
#[must_use]
pub fn order_words(words: Vec<Word>, order: StudyOrder) -> Vec<Word> {
    order_words_with(words, order, &mut rand::rng())
}

/// Arrange `words` for a run using the given RNG (Fisher-Yates when shuffled).
#[must_use]
pub fn order_words_with<R: Rng + ?Sized>(
    mut words: Vec<Word>,
    order: StudyOrder,
    rng: &mut R,
) -> Vec<Word> {
    if order.is_shuffled() {
        words.shuffle(rng);
    }
    words
}
