//! Error types for the notecards-core library.

use thiserror::Error;

/// Main error type for the notecards library.
#[derive(Error, Debug)]
pub enum NotecardsError {
    /// OCR backend error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// Deck import error.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the OCR adapter.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Missing image or backend address. Raised before any request is made.
    #[error("{0}")]
    Validation(String),

    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The backend answered 2xx with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl OcrError {
    /// Reduce the error to the message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            OcrError::Validation(msg) => msg.clone(),
            OcrError::Network(_) => {
                "Could not reach the OCR service. Check your connection and try again.".to_string()
            }
            OcrError::Server { message, .. } => message.clone(),
            OcrError::InvalidResponse(_) => {
                "The OCR service returned an unexpected response. Please try again.".to_string()
            }
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            OcrError::Validation(_) => false,
            OcrError::Network(_) | OcrError::InvalidResponse(_) => true,
            OcrError::Server { status, .. } => *status >= 500,
        }
    }
}

/// Errors related to serializing a deck.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV buffer failed.
    #[error("failed to flush CSV: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8")]
    Encoding,
}

/// Errors related to reading a previously exported deck.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input is not a JSON array of cards.
    #[error("malformed deck: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A card has an empty question or answer.
    #[error("card {id} has an empty {field}")]
    EmptyField { id: String, field: &'static str },

    /// Two cards share an id, within the file or with the current deck.
    #[error("duplicate card id {0}")]
    DuplicateId(String),
}

/// Result type for the notecards library.
pub type Result<T> = std::result::Result<T, NotecardsError>;
