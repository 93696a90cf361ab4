//! In-memory ordered card collection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::card::{CardId, Flashcard};

/// Where a batch of cards is merged into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    /// Before all existing cards.
    Start,
    /// After all existing cards.
    #[default]
    End,
}

/// Ordered collection of flashcards for one session.
///
/// Duplicates are allowed; cards are only told apart by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardStore {
    cards: Vec<Flashcard>,
}

impl CardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `cards` in the given order.
    pub fn from_cards(cards: Vec<Flashcard>) -> Self {
        Self { cards }
    }

    /// Merge a batch at `position`, keeping the batch's internal order.
    pub fn insert_batch(&mut self, cards: Vec<Flashcard>, position: InsertPosition) {
        debug!("Inserting {} cards at {:?}", cards.len(), position);

        match position {
            InsertPosition::End => self.cards.extend(cards),
            InsertPosition::Start => {
                self.cards.splice(0..0, cards);
            }
        }
    }

    /// Remove the card with `id`, if present.
    pub fn remove(&mut self, id: &CardId) -> Option<Flashcard> {
        let index = self.cards.iter().position(|card| &card.id == id)?;
        debug!("Removing card {}", id);
        Some(self.cards.remove(index))
    }

    /// Replace the card sharing `card.id`. Returns `false` when no card matched.
    pub fn replace(&mut self, card: Flashcard) -> bool {
        match self.cards.iter_mut().find(|existing| existing.id == card.id) {
            Some(existing) => {
                *existing = card;
                true
            }
            None => false,
        }
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Number of cards.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Whether the store holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by id.
    pub fn get(&self, id: &CardId) -> Option<&Flashcard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Cards in store order.
    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    /// Iterate over cards in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flashcard> {
        self.cards.iter()
    }

    /// Consume the store, returning its cards.
    pub fn into_cards(self) -> Vec<Flashcard> {
        self.cards
    }
}

impl<'a> IntoIterator for &'a CardStore {
    type Item = &'a Flashcard;
    type IntoIter = std::slice::Iter<'a, Flashcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
