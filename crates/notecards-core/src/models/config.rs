//! Configuration structures for the flashcard pipeline.

use serde::{Deserialize, Serialize};

/// Environment variable that supplies the OCR backend address.
pub const OCR_URL_ENV: &str = "NOTECARDS_OCR_URL";

/// Main configuration for notecards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotecardsConfig {
    /// OCR backend configuration.
    pub ocr: OcrConfig,

    /// Text-to-card synthesis configuration.
    pub synthesis: SynthesisConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// OCR backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Base address of the OCR backend, e.g. `http://localhost:8000`.
    pub base_url: Option<String>,

    /// Path of the recognition endpoint relative to `base_url`.
    pub endpoint_path: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            endpoint_path: "/api/ocr".to_string(),
            timeout_secs: 60,
        }
    }
}

impl OcrConfig {
    /// Config pointing at `base_url` with default path and timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Full endpoint URL, or `None` when no usable base address is set.
    pub fn endpoint_url(&self) -> Option<String> {
        let base = self.base_url.as_deref()?.trim().trim_end_matches('/');
        if base.is_empty() {
            return None;
        }

        let path = self.endpoint_path.trim_start_matches('/');
        Some(format!("{}/{}", base, path))
    }
}

/// Question template used when none, or a blank one, is configured.
pub const DEFAULT_QUESTION_TEMPLATE: &str = "What is: {line}?";

/// Synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Character separating question from answer on a line.
    pub delimiter: char,

    /// Question used for lines without a delimiter; `{line}` is replaced by the line.
    pub question_template: String,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            delimiter: ':',
            question_template: DEFAULT_QUESTION_TEMPLATE.to_string(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when none is given on the command line.
    pub default_format: crate::export::ExportFormat,
}

impl NotecardsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(OCR_URL_ENV).ok();
        self.with_ocr_url_override(value)
    }

    fn with_ocr_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.ocr.base_url = Some(url);
        }
        self
    }
}
