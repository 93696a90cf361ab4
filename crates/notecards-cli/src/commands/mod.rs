//! Subcommands and the plumbing they share.

pub mod config;
pub mod deck;
pub mod generate;
pub mod ocr;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use notecards_core::{ExportFormat, NotecardsConfig, Session};

/// Output format for exported decks.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (can be loaded again as a deck)
    Json,
    /// CSV with Question,Answer columns
    Csv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => ExportFormat::Json,
            OutputFormat::Csv => ExportFormat::Csv,
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notecards")
        .join("config.json")
}

/// Load configuration from `path`, the default location, or built-in defaults,
/// then apply environment overrides.
pub fn load_config(path: Option<&str>) -> anyhow::Result<NotecardsConfig> {
    let config = match path {
        Some(path) => NotecardsConfig::from_file(Path::new(path))?,
        None => {
            let default_path = default_config_path();
            if default_path.exists() {
                debug!("Loading config from {}", default_path.display());
                NotecardsConfig::from_file(&default_path)?
            } else {
                NotecardsConfig::default()
            }
        }
    };

    Ok(config.with_env_overrides())
}

/// Create a session, preloaded with the cards of `deck` when that file exists.
pub fn open_session(config: &NotecardsConfig, deck: Option<&Path>) -> anyhow::Result<Session> {
    let mut session = Session::from_config(config)?;

    if let Some(deck) = deck.filter(|p| p.exists()) {
        let json = fs::read_to_string(deck)?;
        let loaded = session.import_json(&json)?;
        debug!("Loaded {} cards from {}", loaded, deck.display());
    }

    Ok(session)
}

/// Write the session's cards back to a JSON deck file.
pub fn save_deck(session: &Session, deck: &Path) -> anyhow::Result<()> {
    let file = session.export(ExportFormat::Json)?;

    if let Some(parent) = deck.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(deck, file.contents)?;

    Ok(())
}

/// Export the session to `output` or stdout.
///
/// When `output` is a directory the export's default file name is used.
pub fn write_export(
    session: &Session,
    format: ExportFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let file = session.export(format)?;

    match output {
        Some(output) => {
            let path = if output.is_dir() {
                output.join(file.filename)
            } else {
                output.to_path_buf()
            };

            fs::write(&path, &file.contents)?;
            eprintln!(
                "{} Wrote {} cards to {} ({})",
                style("✓").green(),
                session.count(),
                path.display(),
                file.mime_type
            );
        }
        None => println!("{}", file.contents),
    }

    Ok(())
}
