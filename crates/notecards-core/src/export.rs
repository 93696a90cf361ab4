//! JSON and CSV serialization of a deck.

use std::collections::HashSet;
use std::fmt;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExportError, ImportError};
use crate::models::card::Flashcard;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "Question,Answer";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Pretty-printed JSON array, lossless.
    #[default]
    Json,
    /// Two-column CSV with every field quoted.
    Csv,
}

impl ExportFormat {
    /// File name used for downloads.
    pub fn filename(&self) -> &'static str {
        match self {
            ExportFormat::Json => "flashcards.json",
            ExportFormat::Csv => "flashcards.csv",
        }
    }

    /// MIME type of the serialized content.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// A serialized deck ready to be written or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub mime_type: &'static str,
    pub contents: String,
}

/// Serialize `cards` in the given format.
pub fn export(cards: &[Flashcard], format: ExportFormat) -> Result<ExportFile, ExportError> {
    let contents = match format {
        ExportFormat::Json => to_json(cards)?,
        ExportFormat::Csv => to_csv(cards)?,
    };

    debug!("Exported {} cards as {}", cards.len(), format);

    Ok(ExportFile {
        filename: format.filename(),
        mime_type: format.mime_type(),
        contents,
    })
}

/// Pretty-printed JSON array of `{id, question, answer}` objects.
pub fn to_json(cards: &[Flashcard]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Read back a deck written by [`to_json`].
pub fn from_json(json: &str) -> Result<Vec<Flashcard>, ImportError> {
    let cards: Vec<Flashcard> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(cards.len());

    for card in &cards {
        if !seen.insert(&card.id) {
            return Err(ImportError::DuplicateId(card.id.to_string()));
        }

        let field = if card.question.trim().is_empty() {
            "question"
        } else if card.answer.trim().is_empty() {
            "answer"
        } else {
            continue;
        };

        return Err(ImportError::EmptyField {
            id: card.id.to_string(),
            field,
        });
    }

    Ok(cards)
}

/// `Question,Answer` header followed by one quoted row per card.
///
/// Quotes inside a field are doubled. Embedded newlines are left as-is inside
/// the quoted field and rows are joined with `\n` with no trailing newline.
pub fn to_csv(cards: &[Flashcard]) -> Result<String, ExportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for card in cards {
        wtr.write_record([&card.question, &card.answer])?;
    }

    let bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    let rows = String::from_utf8(bytes).map_err(|_| ExportError::Encoding)?;

    let mut output = String::from(CSV_HEADER);
    if let Some(rows) = rows.strip_suffix('\n') {
        output.push('\n');
        output.push_str(rows);
    }

    Ok(output)
}
