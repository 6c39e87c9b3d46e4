pub mod models;
pub mod store;

pub use models::{sanitize_keywords, Card, Deck, Subdeck};
pub use store::DeckStore;
