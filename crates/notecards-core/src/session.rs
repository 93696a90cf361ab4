//! A study session: one deck plus the means to fill and export it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::error::{ExportError, ImportError, OcrError, Result};
use crate::export::{self, ExportFile, ExportFormat};
use crate::models::card::{CardId, Flashcard, IdGenerator};
use crate::models::config::NotecardsConfig;
use crate::ocr::{ImagePayload, OcrClient};
use crate::store::{CardStore, InsertPosition};
use crate::text::{CardSynthesizer, DelimiterSynthesizer};

/// Where new batches land in the deck. New cards always go to the end.
pub const MERGE_POSITION: InsertPosition = InsertPosition::End;

/// Owns the deck for the duration of a session.
#[derive(Debug)]
pub struct Session<S = DelimiterSynthesizer> {
    store: CardStore,
    ids: IdGenerator,
    synthesizer: S,
    ocr: OcrClient,
    busy: Arc<AtomicBool>,
}

impl Session<DelimiterSynthesizer> {
    /// Create an empty session from configuration.
    pub fn from_config(config: &NotecardsConfig) -> Result<Self> {
        let synthesizer = DelimiterSynthesizer::from_config(&config.synthesis);
        let ocr = OcrClient::new(config.ocr.clone())?;
        Ok(Self::new(synthesizer, ocr))
    }
}

impl<S: CardSynthesizer> Session<S> {
    /// Create an empty session.
    pub fn new(synthesizer: S, ocr: OcrClient) -> Self {
        Self {
            store: CardStore::new(),
            ids: IdGenerator::new(),
            synthesizer,
            ocr,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Synthesize cards from `text` and merge them. Returns the number added.
    pub fn generate_from_text(&mut self, text: &str) -> usize {
        let cards = self.synthesizer.synthesize(text, &self.ids);
        self.merge(cards)
    }

    /// Recognize cards in `image` and merge them. Returns the number added.
    ///
    /// The deck is left untouched on error.
    pub async fn recognize_image(&mut self, image: &ImagePayload) -> std::result::Result<usize, OcrError> {
        let result = {
            let _busy = BusyGuard::acquire(&self.busy);
            self.ocr.recognize(image, &self.ids).await
        };

        Ok(self.merge(result?))
    }

    /// Whether an OCR request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Shared handle to the busy flag, for UIs polling from elsewhere.
    pub fn busy_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.busy)
    }

    /// Merge cards from a JSON export. Returns the number added.
    ///
    /// Nothing is merged if any imported id is already in the deck.
    pub fn import_json(&mut self, json: &str) -> std::result::Result<usize, ImportError> {
        let cards = export::from_json(json)?;
        if let Some(card) = cards.iter().find(|card| self.store.get(&card.id).is_some()) {
            return Err(ImportError::DuplicateId(card.id.to_string()));
        }

        self.ids.resume_after(cards.iter().map(|card| &card.id));
        Ok(self.merge(cards))
    }

    /// Remove a card; unknown ids are ignored.
    pub fn remove(&mut self, id: &CardId) -> Option<Flashcard> {
        self.store.remove(id)
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// The deck.
    pub fn store(&self) -> &CardStore {
        &self.store
    }

    /// Serialize the deck.
    pub fn export(&self, format: ExportFormat) -> std::result::Result<ExportFile, ExportError> {
        export::export(self.store.cards(), format)
    }

    fn merge(&mut self, cards: Vec<Flashcard>) -> usize {
        let added = cards.len();
        self.store.insert_batch(cards, MERGE_POSITION);
        info!("Added {} cards, deck now has {}", added, self.store.count());
        added
    }
}

/// Sets the busy flag for its lifetime, including when the request future is dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrConfig;
    use pretty_assertions::assert_eq;

    fn new_session() -> Session {
        Session::from_config(&NotecardsConfig::default()).unwrap()
    }

    #[test]
    fn test_generate_appends_batches() {
        let mut session = new_session();
        assert_eq!(session.generate_from_text("a: 1\nb: 2"), 2);
        assert_eq!(session.generate_from_text("c: 3"), 1);

        let questions: Vec<_> = session.store().iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ids_unique_across_batches() {
        let mut session = new_session();
        session.generate_from_text("x\nx");
        session.generate_from_text("x");

        let mut ids: Vec<_> = session.store().iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_removed_id_is_not_reused() {
        let mut session = new_session();
        session.generate_from_text("only");
        let id = session.store().cards()[0].id.clone();

        session.remove(&id);
        session.generate_from_text("only");
        assert_ne!(session.store().cards()[0].id, id);
    }

    #[test]
    fn test_remove_unknown_keeps_count() {
        let mut session = new_session();
        session.generate_from_text("a\nb");
        assert!(session.remove(&CardId::from("missing")).is_none());
        assert_eq!(session.count(), 2);
    }

    #[test]
    fn test_import_then_generate_does_not_collide() {
        let mut session = new_session();
        session.generate_from_text("a\nb\nc");
        let json = session.export(ExportFormat::Json).unwrap().contents;

        let mut restored = new_session();
        assert_eq!(restored.import_json(&json).unwrap(), 3);
        assert_eq!(restored.store(), session.store());

        restored.generate_from_text("d");
        let existing: Vec<_> = session.store().iter().map(|c| &c.id).collect();
        let newest = &restored.store().cards()[3].id;
        assert!(!existing.contains(&newest));
    }

    #[test]
    fn test_reimport_into_same_deck_is_rejected() {
        let mut session = new_session();
        session.generate_from_text("a: 1");
        let json = session.export(ExportFormat::Json).unwrap().contents;

        let err = session.import_json(&json).unwrap_err();
        assert!(matches!(err, ImportError::DuplicateId(_)));
        assert_eq!(session.count(), 1);

        let id = session.store().cards()[0].id.clone();
        session.remove(&id);
        assert!(session.store().get(&id).is_none());
    }

    #[test]
    fn test_clear() {
        let mut session = new_session();
        session.generate_from_text("a\nb");
        session.clear();
        assert_eq!(session.count(), 0);
    }

    #[tokio::test]
    async fn test_recognize_without_backend_is_validation_error() {
        let mut session = Session::new(
            DelimiterSynthesizer::new(),
            OcrClient::new(OcrConfig::default()).unwrap(),
        );
        let image = ImagePayload::from_bytes(b"png", "image/png");

        let err = session.recognize_image(&image).await.unwrap_err();
        assert!(matches!(err, OcrError::Validation(_)));
        assert!(!session.is_busy());
        assert_eq!(session.count(), 0);
    }
}
