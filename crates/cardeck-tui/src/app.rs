use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::info;

use cardeck_core::{AppConfig, Card, Deck, DeckStore};

use crate::carousel::CarouselEngine;
use crate::theme::Theme;

/// Which panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    DeckList,
    Carousel,
    Detail,
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Editing the deck filter query
    Filter,
    /// Help overlay is shown
    Help,
}

/// One selectable row in the deck panel: a deck or one of its subdecks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckRow {
    pub deck: usize,
    pub subdeck: Option<usize>,
}

/// Which face of the opened card is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    pub fn flipped(self) -> Self {
        match self {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        }
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    store: DeckStore,
    pub decks: Vec<Deck>,
    /// Index into `visible_rows()` of the selected row
    pub selected_row: usize,
    pub filter: String,
    pub carousel: CarouselEngine,
    pub focus: Focus,
    pub mode: Mode,
    /// Real index of the card opened in the detail overlay
    pub open_card: Option<usize>,
    pub detail_side: CardSide,
    pub detail_scroll: u16,
    pub status_message: Option<String>,
    pub should_quit: bool,
    /// Inner area of the carousel panel from the last draw, for mapping
    /// pointer positions onto track pixels
    pub carousel_area: Rect,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Result<Self> {
        let store = DeckStore::new(config.decks_dir())?;
        let carousel = CarouselEngine::new(0, 0, config.carousel);
        let mut app = Self {
            config,
            theme,
            store,
            decks: Vec::new(),
            selected_row: 0,
            filter: String::new(),
            carousel,
            focus: Focus::Carousel,
            mode: Mode::Normal,
            open_card: None,
            detail_side: CardSide::Front,
            detail_scroll: 0,
            status_message: None,
            should_quit: false,
            carousel_area: Rect::default(),
        };
        app.reload_decks()?;
        Ok(app)
    }

    /// Reload all decks from disk, keeping the selection where possible
    pub fn reload_decks(&mut self) -> Result<()> {
        self.decks = self.store.load_all()?;
        info!("Loaded {} decks", self.decks.len());
        self.clamp_selection();
        self.sync_carousel();
        Ok(())
    }

    /// Rows shown in the deck panel, in display order: each matching deck
    /// followed by its matching subdecks.
    ///
    /// A deck matches when its title, or any of its own cards, matches the
    /// filter; a subdeck matches when its parent matched, or its own title
    /// or cards do. Card matching covers titles and keywords.
    pub fn visible_rows(&self) -> Vec<DeckRow> {
        let query = self.filter.to_lowercase();
        let mut rows = Vec::new();
        for (d, deck) in self.decks.iter().enumerate() {
            let deck_hit = query.is_empty()
                || deck.title.to_lowercase().contains(&query)
                || deck.cards.iter().any(|c| card_matches(c, &query));
            let sub_hits: Vec<usize> = deck
                .subdecks
                .iter()
                .enumerate()
                .filter(|(_, sub)| {
                    deck_hit
                        || sub.title.to_lowercase().contains(&query)
                        || sub.cards.iter().any(|c| card_matches(c, &query))
                })
                .map(|(s, _)| s)
                .collect();
            if deck_hit || !sub_hits.is_empty() {
                rows.push(DeckRow { deck: d, subdeck: None });
                rows.extend(sub_hits.into_iter().map(|s| DeckRow { deck: d, subdeck: Some(s) }));
            }
        }
        rows
    }

    pub fn current_row(&self) -> Option<DeckRow> {
        self.visible_rows().get(self.selected_row).copied()
    }

    pub fn current_deck(&self) -> Option<&Deck> {
        self.current_row().map(|row| &self.decks[row.deck])
    }

    /// Cards in the carousel: the selected deck's own cards, or the
    /// selected subdeck's
    pub fn current_cards(&self) -> &[Card] {
        match self.current_row() {
            Some(DeckRow { deck, subdeck: Some(s) }) => &self.decks[deck].subdecks[s].cards,
            Some(DeckRow { deck, subdeck: None }) => &self.decks[deck].cards,
            None => &[],
        }
    }

    /// Panel title for the selected row, e.g. "Rust basics / Collections"
    pub fn current_location(&self) -> Option<String> {
        let row = self.current_row()?;
        let deck = &self.decks[row.deck];
        Some(match row.subdeck {
            Some(s) => format!("{} / {}", deck.title, deck.subdecks[s].title),
            None => deck.title.clone(),
        })
    }

    /// Card centred in the carousel
    pub fn current_card(&self) -> Option<&Card> {
        self.current_cards().get(self.carousel.current_real_index())
    }

    /// Card opened in the detail overlay
    pub fn opened_card(&self) -> Option<&Card> {
        self.current_cards().get(self.open_card?)
    }

    pub fn select_next_row(&mut self) {
        let count = self.visible_rows().len();
        if count > 0 && self.selected_row + 1 < count {
            self.selected_row += 1;
            self.sync_carousel();
        }
    }

    pub fn select_prev_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            self.sync_carousel();
        }
    }

    /// Re-apply the filter after an edit
    pub fn filter_changed(&mut self) {
        self.clamp_selection();
        self.sync_carousel();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filter_changed();
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= count {
            self.selected_row = count - 1;
        }
    }

    /// Re-seed the carousel for the currently selected row
    fn sync_carousel(&mut self) {
        let len = self.current_cards().len();
        self.carousel.reset(len, 0);
        self.close_card();
    }

    pub fn open_current_card(&mut self) {
        if self.current_card().is_some() {
            self.open_card_at(self.carousel.current_real_index());
        }
    }

    pub fn open_card_at(&mut self, real_index: usize) {
        if real_index < self.current_cards().len() {
            self.open_card = Some(real_index);
            self.detail_side = CardSide::Front;
            self.detail_scroll = 0;
            self.focus = Focus::Detail;
        }
    }

    pub fn close_card(&mut self) {
        self.open_card = None;
        self.detail_scroll = 0;
        if self.focus == Focus::Detail {
            self.focus = Focus::Carousel;
        }
    }

    /// Flip the opened card between front and back
    pub fn flip_card(&mut self) {
        if self.open_card.is_some() {
            self.detail_side = self.detail_side.flipped();
            self.detail_scroll = 0;
        }
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Track pixels per terminal cell, derived from the anchor spacing
    pub fn px_per_cell(&self) -> f64 {
        let cells = self.config.ui.card_step_cells.max(1) as f64;
        self.config.carousel.step_px / cells
    }

    /// Carousel viewport width in track pixels
    pub fn viewport_width_px(&self) -> f64 {
        self.carousel_area.width as f64 * self.px_per_cell()
    }

    fn in_carousel(&self, column: u16, row: u16) -> bool {
        let a = self.carousel_area;
        column >= a.x && column < a.x + a.width && row >= a.y && row < a.y + a.height
    }

    /// Pointer column mapped onto the carousel's pixel track
    fn track_x(&self, column: u16) -> f64 {
        column.saturating_sub(self.carousel_area.x) as f64 * self.px_per_cell()
    }

    fn track_y(&self, row: u16) -> f64 {
        row.saturating_sub(self.carousel_area.y) as f64 * self.px_per_cell()
    }

    /// Feed a pointer event into the carousel engine
    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let inside = self.in_carousel(mouse.column, mouse.row);
        let x = self.track_x(mouse.column);
        let y = self.track_y(mouse.row);
        let viewport = self.viewport_width_px();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.focus = Focus::Carousel;
                if let Some(slot) = self.carousel.slot_at(x, viewport) {
                    self.carousel.press(slot, x, y);
                }
                self.carousel.drag_start(x);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.carousel.drag_move(x);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.carousel.drag_end(now);
                let slot = self.carousel.slot_at(x, viewport).unwrap_or(usize::MAX);
                if let Some(real) = self.carousel.release(slot, x, y) {
                    self.open_card_at(real);
                }
            }
            MouseEventKind::Moved => {
                let slot = if inside {
                    self.carousel.slot_at(x, viewport)
                } else {
                    None
                };
                self.carousel.hover(slot);
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollRight if inside => {
                self.carousel.next(now);
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft if inside => {
                self.carousel.prev(now);
            }
            _ => {}
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        let config = Arc::new(AppConfig::default());
        let dir = std::env::temp_dir().join("cardeck-app-tests");
        let store = DeckStore::new(dir).expect("temp deck store");
        let carousel = CarouselEngine::new(0, 0, config.carousel);
        Self {
            config,
            theme: Theme::default(),
            store,
            decks: Vec::new(),
            selected_row: 0,
            filter: String::new(),
            carousel,
            focus: Focus::Carousel,
            mode: Mode::Normal,
            open_card: None,
            detail_side: CardSide::Front,
            detail_scroll: 0,
            status_message: None,
            should_quit: false,
            carousel_area: Rect::new(0, 0, 48, 12),
        }
    }
}

fn card_matches(card: &Card, query: &str) -> bool {
    card.title.to_lowercase().contains(query)
        || card.keywords.iter().any(|k| k.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app_with_deck(cards: usize) -> App {
        let mut app = App::for_tests();
        let mut deck = Deck::new("Test deck");
        for i in 0..cards {
            deck.cards.push(Card::new(format!("Card {i}"), "<p>front</p>", "<p>back</p>"));
        }
        app.decks = vec![deck];
        app.filter_changed();
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_sync_carousel_on_deck_change() {
        let app = app_with_deck(5);
        assert_eq!(app.carousel.len(), 5);
        assert_eq!(app.carousel.current_real_index(), 0);
    }

    fn app_with_subdeck() -> App {
        let mut app = App::for_tests();
        let mut deck = Deck::new("Rust basics");
        deck.cards.push(
            Card::new("Ownership", "<p>q</p>", "<p>a</p>").with_keywords(&["moves"]),
        );
        let mut sub = cardeck_core::Subdeck::new("Collections");
        sub.cards.push(
            Card::new("HashMap", "<p>q</p>", "<p>a</p>").with_keywords(&["hashing"]),
        );
        sub.cards.push(Card::new("Vec", "<p>q</p>", "<p>a</p>"));
        deck.subdecks.push(sub);
        app.decks = vec![deck, Deck::new("French verbs")];
        app.filter_changed();
        app
    }

    #[test]
    fn test_filter_narrows_decks() {
        let mut app = App::for_tests();
        app.decks = vec![Deck::new("Rust basics"), Deck::new("French verbs")];
        app.filter = "rust".to_string();
        app.filter_changed();
        assert_eq!(app.visible_rows().len(), 1);
        assert_eq!(app.current_deck().map(|d| d.title.as_str()), Some("Rust basics"));
    }

    #[test]
    fn test_subdecks_listed_under_their_deck() {
        let app = app_with_subdeck();
        let rows = app.visible_rows();
        // Rust basics, its Collections subdeck, then French verbs
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], DeckRow { deck: 0, subdeck: None });
        assert_eq!(rows[1], DeckRow { deck: 0, subdeck: Some(0) });
        assert_eq!(rows[2], DeckRow { deck: 1, subdeck: None });
    }

    #[test]
    fn test_selecting_subdeck_row_swaps_carousel_cards() {
        let mut app = app_with_subdeck();
        assert_eq!(app.carousel.len(), 1); // deck's own cards
        app.select_next_row();
        assert_eq!(app.carousel.len(), 2); // subdeck cards
        assert_eq!(app.current_card().map(|c| c.title.as_str()), Some("HashMap"));
        assert_eq!(
            app.current_location().as_deref(),
            Some("Rust basics / Collections")
        );
    }

    #[test]
    fn test_filter_matches_card_title_and_keywords() {
        let mut app = app_with_subdeck();
        // Card title in the deck's own cards
        app.filter = "ownership".to_string();
        app.filter_changed();
        assert_eq!(app.current_deck().map(|d| d.title.as_str()), Some("Rust basics"));

        // Keyword on a card inside a subdeck surfaces the subdeck row too
        app.filter = "hashing".to_string();
        app.filter_changed();
        let rows = app.visible_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].subdeck, Some(0));
        // The deck with no matching cards is gone
        assert!(rows.iter().all(|r| r.deck == 0));
    }

    #[test]
    fn test_filter_on_deck_title_keeps_subdecks() {
        let mut app = app_with_subdeck();
        app.filter = "rust".to_string();
        app.filter_changed();
        // Matching the deck itself keeps every subdeck visible
        assert_eq!(app.visible_rows().len(), 2);
    }

    #[test]
    fn test_filter_no_match_leaves_empty_carousel() {
        let mut app = app_with_deck(3);
        app.filter = "zzz".to_string();
        app.filter_changed();
        assert!(app.current_deck().is_none());
        assert!(app.carousel.is_empty());
    }

    #[test]
    fn test_open_and_flip_card() {
        let mut app = app_with_deck(3);
        app.open_current_card();
        assert_eq!(app.open_card, Some(0));
        assert_eq!(app.detail_side, CardSide::Front);
        assert_eq!(app.focus, Focus::Detail);
        app.flip_card();
        assert_eq!(app.detail_side, CardSide::Back);
        app.close_card();
        assert_eq!(app.open_card, None);
        assert_eq!(app.focus, Focus::Carousel);
    }

    #[test]
    fn test_mouse_tap_opens_card() {
        let mut app = app_with_deck(5);
        let now = Instant::now();
        // for_tests area: 48 cells wide at origin; px_per_cell = 200/12
        // Column 2 maps to ~33px, inside slot 5 (the centred card at x=0)
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 3), now);
        app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 3), now);
        assert_eq!(app.open_card, Some(0));
    }

    #[test]
    fn test_mouse_drag_pans_without_opening() {
        let mut app = app_with_deck(5);
        let now = Instant::now();
        let offset_before = app.carousel.offset();
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 3), now);
        // 6 cells of travel is ~100px, well past both thresholds
        app.on_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 4, 3), now);
        assert!(app.carousel.offset() < offset_before);
        app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 4, 3), now);
        assert_eq!(app.open_card, None);
        assert!(app.carousel.is_animating() || app.carousel.offset() != offset_before);
    }

    #[test]
    fn test_mouse_outside_carousel_ignored() {
        let mut app = app_with_deck(5);
        let now = Instant::now();
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 20), now);
        app.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 60, 20), now);
        assert_eq!(app.open_card, None);
    }

    #[test]
    fn test_scroll_wheel_advances() {
        let mut app = app_with_deck(5);
        let now = Instant::now();
        app.on_mouse(mouse(MouseEventKind::ScrollDown, 10, 3), now);
        assert_eq!(app.carousel.virtual_index(), 6);
    }
}
