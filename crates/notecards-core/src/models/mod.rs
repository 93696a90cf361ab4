//! Data models and configuration.

pub mod card;
pub mod config;

pub use card::{CardId, Flashcard, IdBatch, IdGenerator};
pub use config::{ExportConfig, NotecardsConfig, OcrConfig, SynthesisConfig};
