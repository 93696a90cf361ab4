//! Core library for turning study notes into flashcards.
//!
//! This crate provides:
//! - Line segmentation and heuristic question/answer synthesis
//! - A client for an external OCR backend that returns recognized cards
//! - An ordered in-memory card store
//! - JSON and CSV export (and JSON import)

pub mod error;
pub mod export;
pub mod models;
pub mod ocr;
pub mod session;
pub mod store;
pub mod text;

pub use error::{ExportError, ImportError, NotecardsError, OcrError, Result};
pub use export::{ExportFile, ExportFormat};
pub use models::card::{CardId, Flashcard, IdGenerator};
pub use models::config::NotecardsConfig;
pub use ocr::{ImagePayload, OcrClient};
pub use session::{Session, MERGE_POSITION};
pub use store::{CardStore, InsertPosition};
pub use text::{segment, CardSynthesizer, DelimiterSynthesizer};
