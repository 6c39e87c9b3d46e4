use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deck of flashcards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub title: String,
    /// Accent theme name for the deck's card faces
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Cards living directly in the deck
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Nested subdecks, each with its own card list
    #[serde(default)]
    pub subdecks: Vec<Subdeck>,
}

impl Deck {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            theme: None,
            is_favorite: false,
            created_at: now,
            updated_at: now,
            cards: Vec::new(),
            subdecks: Vec::new(),
        }
    }

    /// Cards living directly in the deck (excluding subdecks)
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards in the deck and all of its subdecks
    pub fn total_card_count(&self) -> usize {
        self.cards.len() + self.subdecks.iter().map(|s| s.cards.len()).sum::<usize>()
    }

    /// Re-key the deck with a fresh identity (used on import so a deck file
    /// copied from elsewhere never collides with an existing one)
    pub fn rekey(&mut self) {
        self.id = Uuid::new_v4();
        self.updated_at = Utc::now();
    }
}

/// A named group of cards nested one level under a deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subdeck {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Subdeck {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            created_at: now,
            updated_at: now,
            cards: Vec::new(),
        }
    }
}

/// A single flashcard; front and back hold HTML fragments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub front_html: String,
    #[serde(default)]
    pub back_html: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(
        title: impl Into<String>,
        front_html: impl Into<String>,
        back_html: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            front_html: front_html.into(),
            back_html: back_html.into(),
            keywords: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        let owned: Vec<String> = keywords.iter().map(|s| s.to_string()).collect();
        self.keywords = sanitize_keywords(&owned);
        self
    }
}

/// Normalise a keyword list: trim whitespace, drop empties, and dedup
/// case-insensitively while keeping the first-seen casing and order.
pub fn sanitize_keywords(input: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for raw in input {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            out.push(trimmed.to_string());
        }
    }
    out
}
