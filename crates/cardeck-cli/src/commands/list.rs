use anyhow::Result;

use cardeck_core::{AppConfig, DeckStore};

pub fn run(config: &AppConfig) -> Result<()> {
    let store = DeckStore::new(config.decks_dir())?;
    let decks = store.load_all()?;

    if decks.is_empty() {
        println!("No decks yet.");
        println!("\nTo create a starter deck, run:");
        println!("  cardeck init");
        return Ok(());
    }

    println!("Decks ({}):\n", decks.len());

    for deck in &decks {
        let favorite = if deck.is_favorite { " ★" } else { "" };
        let theme = deck
            .theme
            .as_deref()
            .map(|t| format!(" [{}]", t))
            .unwrap_or_default();

        println!("  {}{}{} - {} cards", deck.title, favorite, theme, deck.total_card_count());
        println!("    ID: {}", deck.id);
        println!("    Updated: {}", deck.updated_at.format("%Y-%m-%d %H:%M"));
        for sub in &deck.subdecks {
            println!("    ▸ {} - {} cards", sub.title, sub.cards.len());
        }
        println!();
    }

    Ok(())
}
