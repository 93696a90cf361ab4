//! Deck command - inspect and edit a saved JSON deck.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use notecards_core::CardId;

use super::{load_config, open_session, save_deck, write_export, OutputFormat};

/// Arguments for the deck command.
#[derive(Args)]
pub struct DeckArgs {
    /// JSON deck file
    #[arg(required = true)]
    deck: PathBuf,

    #[command(subcommand)]
    command: DeckCommand,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List cards
    List,

    /// Show the number of cards
    Count,

    /// Remove cards by id
    Remove {
        /// Card ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Remove all cards
    Clear,

    /// Export the deck
    Export {
        /// Output file or directory (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

pub async fn run(args: DeckArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.deck.exists() {
        anyhow::bail!("Deck not found: {}", args.deck.display());
    }

    let config = load_config(config_path)?;
    let mut session = open_session(&config, Some(&args.deck))?;

    match args.command {
        DeckCommand::List => {
            if session.count() == 0 {
                println!("No flashcards yet.");
            }
            for card in session.store() {
                println!("{}", style(&card.id).dim());
                println!("  Q: {}", card.question);
                println!("  A: {}", card.answer);
            }
        }
        DeckCommand::Count => println!("{}", session.count()),
        DeckCommand::Remove { ids } => {
            for id in ids {
                let id = CardId::new(id);
                match session.remove(&id) {
                    Some(_) => eprintln!("{} Removed {}", style("✓").green(), id),
                    None => eprintln!("{} No card with id {}", style("ℹ").blue(), id),
                }
            }
            save_deck(&session, &args.deck)?;
        }
        DeckCommand::Clear => {
            let removed = session.count();
            session.clear();
            save_deck(&session, &args.deck)?;
            eprintln!("{} Removed {} cards", style("✓").green(), removed);
        }
        DeckCommand::Export { output, format } => {
            let format = format.map(Into::into).unwrap_or(config.export.default_format);
            write_export(&session, format, output.as_deref())?;
        }
    }

    Ok(())
}
