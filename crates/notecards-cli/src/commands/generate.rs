//! Generate command - turn study notes into flashcards.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use super::{load_config, open_session, save_deck, write_export, OutputFormat};

/// Arguments for the generate command.
#[derive(Args)]
pub struct GenerateArgs {
    /// Text file with one fact per line ("-" for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// JSON deck to merge the new cards into (created if missing)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Output file or directory for the export
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

pub async fn run(args: GenerateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let mut session = open_session(&config, args.deck.as_deref())?;
    let added = session.generate_from_text(&text);

    info!("Generated {} cards from {}", added, args.input.display());

    if added == 0 {
        eprintln!(
            "{} No flashcards generated. Put one fact per line, e.g. \"Term: Definition\".",
            style("⚠").yellow()
        );
    } else {
        eprintln!(
            "{} Generated {} flashcards ({} in deck)",
            style("✓").green(),
            added,
            session.count()
        );
    }

    if let Some(deck) = &args.deck {
        save_deck(&session, deck)?;
    }

    if args.output.is_some() || args.deck.is_none() {
        let format = args.format.map(Into::into).unwrap_or(config.export.default_format);
        write_export(&session, format, args.output.as_deref())?;
    }

    Ok(())
}
