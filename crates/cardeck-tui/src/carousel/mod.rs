//! Infinite overlap carousel for card faces.
//!
//! The engine keeps a virtual index over a logically circular card sequence.
//! When looping, the sequence is conceptually laid out as three concatenated
//! copies `[A | B | C]`; the active index always comes to rest inside the
//! middle copy, and a silent "re-seat" after each animated move keeps it
//! there. Dragging pans the track continuously and snaps to the nearest
//! card anchor on release; a press that never travels past the acquire
//! threshold stays a tap and activates the card instead.
//!
//! All time-dependent operations take an explicit `now: Instant`, so tests
//! drive the animation and the deferred re-seat with virtual time instead of
//! sleeping.

pub mod config;
pub mod easing;
pub mod engine;
pub mod timing;

pub use config::{CarouselConfig, CarouselConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use engine::CarouselEngine;
