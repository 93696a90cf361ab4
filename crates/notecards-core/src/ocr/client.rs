//! HTTP client for the OCR backend.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use super::{ErrorPayload, ImagePayload, OcrRequest, OcrResponse};
use crate::error::{NotecardsError, OcrError};
use crate::models::card::{Flashcard, IdGenerator};
use crate::models::config::{OcrConfig, OCR_URL_ENV};

/// Sends images to the OCR backend and maps its answer to flashcards.
///
/// One request per call. Nothing here prevents two calls from overlapping;
/// callers that care track their own busy state.
#[derive(Debug, Clone)]
pub struct OcrClient {
    client: Client,
    config: OcrConfig,
}

impl OcrClient {
    /// Create a client. The base address may be missing; that is only
    /// reported when [`recognize`](Self::recognize) is called.
    pub fn new(config: OcrConfig) -> Result<Self, NotecardsError> {
        let client = Client::builder()
            .user_agent(concat!("notecards/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| NotecardsError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Whether a backend address is configured.
    pub fn is_configured(&self) -> bool {
        self.config.endpoint_url().is_some()
    }

    /// Recognize flashcards in `image`.
    ///
    /// Validation failures are returned before any request is made.
    pub async fn recognize(
        &self,
        image: &ImagePayload,
        ids: &IdGenerator,
    ) -> Result<Vec<Flashcard>, OcrError> {
        if image.is_empty() {
            return Err(OcrError::Validation(
                "No image selected. Choose an image before running OCR.".to_string(),
            ));
        }

        let url = self.config.endpoint_url().ok_or_else(|| {
            OcrError::Validation(format!(
                "OCR backend is not configured. Set {} or ocr.base_url in the config file.",
                OCR_URL_ENV
            ))
        })?;

        debug!("Sending OCR request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&OcrRequest {
                image_base64: image.as_data_url(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OcrError::Network("request timed out".to_string())
                } else {
                    OcrError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        debug!("OCR response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(server_error(status, &body));
        }

        let payload: OcrResponse = response
            .json()
            .await
            .map_err(|e| OcrError::InvalidResponse(e.to_string()))?;

        let batch = ids.batch();
        let mut cards = Vec::with_capacity(payload.cards.len());

        for (index, pair) in payload.cards.iter().enumerate() {
            match Flashcard::new(batch.next_id(), &pair.question, &pair.answer) {
                Some(card) => cards.push(card),
                None => warn!("Skipping recognized pair {} with an empty side", index),
            }
        }

        info!("OCR recognized {} cards", cards.len());

        Ok(cards)
    }
}

/// Build a server error from a non-success response body.
fn server_error(status: StatusCode, body: &str) -> OcrError {
    let detail = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(message) => Some(message),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .filter(|message| !message.trim().is_empty());

    let message = detail
        .unwrap_or_else(|| format!("OCR request failed with status {}", status.as_u16()));

    OcrError::Server {
        status: status.as_u16(),
        message,
    }
}
