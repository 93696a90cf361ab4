//! Client for the external OCR backend.
//!
//! Images are sent as base64 data URLs; the backend answers with recognized
//! question/answer pairs, which are turned into flashcards with locally
//! generated ids.

mod client;
mod image;

pub use client::OcrClient;
pub use image::ImagePayload;

use serde::{Deserialize, Serialize};

/// Request body of `POST <base>/api/ocr`.
#[derive(Debug, Serialize)]
struct OcrRequest<'a> {
    image_base64: &'a str,
}

/// Success body: `{"cards": [{"q": "...", "a": "..."}]}`.
#[derive(Debug, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    cards: Vec<RecognizedPair>,
}

/// A question/answer pair as recognized by the backend.
#[derive(Debug, Deserialize)]
struct RecognizedPair {
    #[serde(rename = "q", default)]
    question: String,
    #[serde(rename = "a", default)]
    answer: String,
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}
