//! Deck persistence as plain JSON files.
//!
//! One file per deck under `<data_dir>/decks/<id>.json`. This is
//! deliberately not a database: decks are small, edits are whole-deck
//! writes, and the files stay hand-editable.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::deck::models::{Card, Deck, Subdeck};
use crate::{Error, Result};

pub struct DeckStore {
    decks_dir: PathBuf,
}

impl DeckStore {
    /// Open a store rooted at `decks_dir`, creating it if missing
    pub fn new(decks_dir: impl Into<PathBuf>) -> Result<Self> {
        let decks_dir = decks_dir.into();
        fs::create_dir_all(&decks_dir)?;
        Ok(Self { decks_dir })
    }

    pub fn decks_dir(&self) -> &Path {
        &self.decks_dir
    }

    fn deck_path(&self, id: Uuid) -> PathBuf {
        self.decks_dir.join(format!("{id}.json"))
    }

    /// Load every readable deck, newest first.
    ///
    /// Unparsable files are skipped with a warning rather than failing the
    /// whole load; one corrupt deck should not take the application down.
    pub fn load_all(&self) -> Result<Vec<Deck>> {
        let mut decks = Vec::new();

        for entry in fs::read_dir(&self.decks_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read_deck(&path) {
                Ok(deck) => decks.push(deck),
                Err(e) => warn!("Skipping unreadable deck file {}: {}", path.display(), e),
            }
        }

        decks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("Loaded {} decks from {}", decks.len(), self.decks_dir.display());
        Ok(decks)
    }

    pub fn load(&self, id: Uuid) -> Result<Deck> {
        let path = self.deck_path(id);
        if !path.exists() {
            return Err(Error::DeckNotFound(id.to_string()));
        }
        self.read_deck(&path)
    }

    pub fn save(&self, deck: &Deck) -> Result<()> {
        let content = serde_json::to_string_pretty(deck)?;
        fs::write(self.deck_path(deck.id), content)?;
        Ok(())
    }

    pub fn delete(&self, id: Uuid) -> Result<()> {
        let path = self.deck_path(id);
        if !path.exists() {
            return Err(Error::DeckNotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Import a deck file from outside the store. The deck is re-keyed so
    /// importing the same file twice yields two independent decks.
    pub fn import(&self, path: &Path) -> Result<Deck> {
        let mut deck = self.read_deck(path)?;
        if deck.title.trim().is_empty() {
            return Err(Error::InvalidDeck("deck has no title".to_string()));
        }
        deck.rekey();
        self.save(&deck)?;
        Ok(deck)
    }

    fn read_deck(&self, path: &Path) -> Result<Deck> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Starter deck written by `cardeck init`
    pub fn sample() -> Deck {
        let mut deck = Deck::new("Rust starter deck");
        deck.theme = Some("aqua".to_string());
        deck.cards = vec![
            Card::new(
                "Ownership",
                "<p>What happens to a value when its owner goes out of scope?</p>",
                "<p>It is <b>dropped</b>: its destructor runs and its memory is freed.</p>",
            )
            .with_keywords(&["rust", "ownership"]),
            Card::new(
                "Borrowing",
                "<p>How many mutable references to a value may exist at once?</p>",
                "<p>Exactly one, and no immutable references at the same time.</p>",
            )
            .with_keywords(&["rust", "borrowing"]),
            Card::new(
                "Option",
                "<p>Which type models a value that may be absent?</p>",
                "<p><code>Option&lt;T&gt;</code>, with variants <code>Some(T)</code> and <code>None</code>.</p>",
            )
            .with_keywords(&["rust", "enums"]),
            Card::new(
                "Result",
                "<p>Which operator propagates errors up the call stack?</p>",
                "<p>The <code>?</code> operator, converting via <code>From</code> as needed.</p>",
            )
            .with_keywords(&["rust", "errors"]),
            Card::new(
                "Traits",
                "<p>What is the Rust mechanism for shared behaviour across types?</p>",
                "<p>Traits: implemented per type, usable as bounds or trait objects.</p>",
            )
            .with_keywords(&["rust", "traits"]),
        ];
        let mut collections = Subdeck::new("Collections");
        collections.cards = vec![
            Card::new(
                "Vec",
                "<p>Which collection is a growable, heap-allocated array?</p>",
                "<p><code>Vec&lt;T&gt;</code>, contiguous and indexable.</p>",
            )
            .with_keywords(&["rust", "collections"]),
            Card::new(
                "HashMap",
                "<p>Which collection maps keys to values by hashing?</p>",
                "<p><code>HashMap&lt;K, V&gt;</code>; keys need <code>Hash + Eq</code>.</p>",
            )
            .with_keywords(&["rust", "collections"]),
        ];
        deck.subdecks.push(collections);
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store() -> (tempfile::TempDir, DeckStore) {
        let dir = tempdir().unwrap();
        let store = DeckStore::new(dir.path().join("decks")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_dir, store) = store();
        let deck = DeckStore::sample();
        store.save(&deck).unwrap();

        let loaded = store.load(deck.id).unwrap();
        assert_eq!(loaded.title, deck.title);
        assert_eq!(loaded.card_count(), deck.card_count());
        assert_eq!(loaded.subdecks.len(), deck.subdecks.len());
        assert_eq!(loaded.total_card_count(), deck.total_card_count());
    }

    #[test]
    fn test_load_all_sorted_newest_first() {
        let (_dir, store) = store();
        let mut old = Deck::new("old");
        old.created_at = chrono::Utc::now() - chrono::Duration::days(2);
        let new = Deck::new("new");
        store.save(&old).unwrap();
        store.save(&new).unwrap();

        let decks = store.load_all().unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].title, "new");
        assert_eq!(decks[1].title, "old");
    }

    #[test]
    fn test_load_all_skips_corrupt_files() {
        let (_dir, store) = store();
        store.save(&Deck::new("good")).unwrap();
        std::fs::write(store.decks_dir().join("broken.json"), "{not json").unwrap();

        let decks = store.load_all().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].title, "good");
    }

    #[test]
    fn test_load_missing_deck() {
        let (_dir, store) = store();
        let err = store.load(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::DeckNotFound(_)));
    }

    #[test]
    fn test_import_rekeys() {
        let (dir, store) = store();
        let deck = DeckStore::sample();
        let outside = dir.path().join("export.json");
        std::fs::write(&outside, serde_json::to_string(&deck).unwrap()).unwrap();

        let imported = store.import(&outside).unwrap();
        assert_ne!(imported.id, deck.id);
        assert_eq!(imported.card_count(), deck.card_count());
        assert!(store.load(imported.id).is_ok());
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = store();
        let deck = Deck::new("doomed");
        store.save(&deck).unwrap();
        store.delete(deck.id).unwrap();
        assert!(matches!(store.load(deck.id), Err(Error::DeckNotFound(_))));
    }
}
