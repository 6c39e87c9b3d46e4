use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cardeck")]
#[command(author, version, about = "A terminal flashcard deck browser")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the data directory from the config file
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List all decks
    List,
    /// Import a deck from a JSON file
    Import {
        /// Path to the deck file
        file: PathBuf,
    },
    /// Delete a deck by id (see `cardeck list`)
    Delete {
        /// Deck id
        id: uuid::Uuid,
    },
    /// Create the data directory, a default config, and a starter deck
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.general.data_dir = dir;
    }
    let config = Arc::new(config);

    // Initialize logging. The TUI owns the terminal, so its logs go to a
    // file under the data directory instead of stderr.
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    if interactive {
        let log_dir = config.data_dir().join("logs");
        std::fs::create_dir_all(&log_dir)?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("cardeck.log"))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::List) => commands::list::run(&config),
        Some(Commands::Import { file }) => commands::import::run(&config, &file),
        Some(Commands::Delete { id }) => commands::delete::run(&config, id),
        Some(Commands::Init) => commands::init::run(&config),
    }
}
