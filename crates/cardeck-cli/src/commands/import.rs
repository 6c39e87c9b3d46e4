use std::path::Path;

use anyhow::{Context, Result};

use cardeck_core::{AppConfig, DeckStore};

pub fn run(config: &AppConfig, file: &Path) -> Result<()> {
    let store = DeckStore::new(config.decks_dir())?;

    let deck = store
        .import(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!(
        "Imported '{}' ({} cards) as {}",
        deck.title,
        deck.card_count(),
        deck.id
    );

    Ok(())
}
