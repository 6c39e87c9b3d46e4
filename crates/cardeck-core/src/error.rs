use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Deck file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),
}

pub type Result<T> = std::result::Result<T, Error>;
