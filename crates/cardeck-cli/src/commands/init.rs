use anyhow::Result;

use cardeck_core::{AppConfig, DeckStore};

pub fn run(config: &AppConfig) -> Result<()> {
    // Write a config file for the user to edit, unless one already exists
    let config_path = AppConfig::config_path();
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
    } else {
        config.save()?;
        println!("Wrote config to {}", config_path.display());
    }

    let store = DeckStore::new(config.decks_dir())?;
    if store.load_all()?.is_empty() {
        let deck = DeckStore::sample();
        store.save(&deck)?;
        println!(
            "Created starter deck '{}' ({} cards) in {}",
            deck.title,
            deck.card_count(),
            store.decks_dir().display()
        );
    } else {
        println!("Decks already present in {}", store.decks_dir().display());
    }

    println!("\nRun `cardeck` to start browsing.");

    Ok(())
}
