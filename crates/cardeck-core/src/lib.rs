pub mod config;
pub mod deck;
pub mod error;

pub use config::{AppConfig, CarouselConfig, EasingType, KeymapConfig};
pub use deck::{Card, Deck, DeckStore, Subdeck};
pub use error::{Error, Result};
