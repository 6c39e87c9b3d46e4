use anyhow::{Context, Result};
use uuid::Uuid;

use cardeck_core::{AppConfig, DeckStore};

pub fn run(config: &AppConfig, id: Uuid) -> Result<()> {
    let store = DeckStore::new(config.decks_dir())?;

    let deck = store
        .load(id)
        .with_context(|| format!("No deck with id {id}"))?;
    store.delete(id)?;

    println!("Deleted '{}' ({} cards)", deck.title, deck.total_card_count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> (tempfile::TempDir, AppConfig) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.general.data_dir = dir.path().to_path_buf();
        (dir, config)
    }

    #[test]
    fn test_delete_removes_deck() {
        let (_dir, config) = test_config();
        let store = DeckStore::new(config.decks_dir()).unwrap();
        let deck = DeckStore::sample();
        store.save(&deck).unwrap();

        run(&config, deck.id).unwrap();
        assert!(store.load(deck.id).is_err());
    }

    #[test]
    fn test_delete_unknown_deck_fails() {
        let (_dir, config) = test_config();
        assert!(run(&config, Uuid::new_v4()).is_err());
    }
}
