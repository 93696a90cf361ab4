//! Turning raw study text into flashcards.

mod segmenter;
mod synthesizer;

pub use segmenter::{segment, Segments};
pub use synthesizer::DelimiterSynthesizer;

use crate::models::card::{Flashcard, IdGenerator};

/// Trait for converting text into flashcards.
pub trait CardSynthesizer {
    /// Build one card per line of `text`, in line order.
    fn synthesize(&self, text: &str, ids: &IdGenerator) -> Vec<Flashcard>;
}
