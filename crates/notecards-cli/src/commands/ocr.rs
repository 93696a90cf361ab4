//! OCR command - recognize flashcards in an image via the OCR backend.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use notecards_core::ImagePayload;

use super::{load_config, open_session, save_deck, write_export, OutputFormat};

/// Arguments for the ocr command.
#[derive(Args)]
pub struct OcrArgs {
    /// Image of study notes
    #[arg(required = true)]
    image: PathBuf,

    /// OCR backend base address (overrides config and NOTECARDS_OCR_URL)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// JSON deck to merge the recognized cards into (created if missing)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Output file or directory for the export
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

pub async fn run(args: OcrArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(endpoint) = args.endpoint {
        config.ocr.base_url = Some(endpoint);
    }

    if !args.image.exists() {
        anyhow::bail!("Image not found: {}", args.image.display());
    }
    let image = ImagePayload::from_path(&args.image)?;
    debug!("Encoded {} ({} bytes as data URL)", args.image.display(), image.as_data_url().len());

    let mut session = open_session(&config, args.deck.as_deref())?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Recognizing text...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = session.recognize_image(&image).await;
    pb.finish_and_clear();

    let added = match result {
        Ok(added) => added,
        Err(e) => {
            debug!("OCR failed: {}", e);
            anyhow::bail!("{}", e.user_message());
        }
    };

    eprintln!(
        "{} Recognized {} flashcards ({} in deck)",
        style("✓").green(),
        added,
        session.count()
    );

    if let Some(deck) = &args.deck {
        save_deck(&session, deck)?;
    }

    if args.output.is_some() || args.deck.is_none() {
        let format = args.format.map(Into::into).unwrap_or(config.export.default_format);
        write_export(&session, format, args.output.as_deref())?;
    }

    Ok(())
}
