//! Image payloads encoded as data URLs.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// An image encoded as a `data:<mime>;base64,<data>` URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePayload {
    data_url: String,
}

impl ImagePayload {
    /// Use an existing data URL as-is.
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self {
            data_url: data_url.into(),
        }
    }

    /// Encode raw image bytes.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        }
    }

    /// Read and encode an image file, guessing the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes, mime_type_for(path)))
    }

    /// The data URL.
    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    /// Whether the payload carries no image data.
    pub fn is_empty(&self) -> bool {
        let data_url = self.data_url.trim();
        match data_url.split_once(',') {
            Some((_, data)) => data.trim().is_empty(),
            None => data_url.is_empty(),
        }
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
