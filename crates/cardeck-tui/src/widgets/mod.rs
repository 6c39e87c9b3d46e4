pub mod card_carousel;
pub mod card_detail;
pub mod deck_list;
pub mod help;
pub mod status_bar;

pub use card_carousel::CardCarouselWidget;
pub use card_detail::CardDetailWidget;
pub use deck_list::DeckListWidget;
pub use help::HelpWidget;
pub use status_bar::StatusBarWidget;
