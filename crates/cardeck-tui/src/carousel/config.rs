//! Carousel configuration glue.
//!
//! The serde-facing struct lives in `cardeck-core`; this module attaches the
//! `Duration` accessors the engine and the event loop need.

use std::time::Duration;

pub use cardeck_core::{CarouselConfig, EasingType};

/// Extension trait for `CarouselConfig` with derived timing values
pub trait CarouselConfigExt {
    /// Snap animation duration
    fn animation_duration(&self) -> Duration;

    /// Delay from the start of a move until the silent re-seat may run
    fn reseat_deadline(&self) -> Duration;
}

impl CarouselConfigExt for CarouselConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    #[inline]
    fn reseat_deadline(&self) -> Duration {
        Duration::from_millis(self.animation_ms + self.reseat_margin_ms)
    }
}
