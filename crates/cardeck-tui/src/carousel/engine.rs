//! Carousel index/offset engine.
//!
//! Pure state machine: no I/O, no wall clock. The caller feeds it pointer
//! and key events plus an explicit `now`, and reads back `offset()` and
//! `stack_order()` when painting.
//!
//! Position model: `N` cards rendered as `C` logical copies (`C = 3` when
//! looping and `N >= 2`, else `1`). A virtual slot `v` in `[0, N*C - 1]`
//! shows card `v % N`, anchored at `v * step` on the track; the track is
//! translated by `offset`, which at rest equals `-virtual_index * step`.
//! Animated moves that land in the first or last copy are silently re-seated
//! by `±N` into the middle copy once the animation has finished, which is
//! what fakes infinite wraparound without ever growing state.
//!
//! Pointer-up handling is split in two and must run in order: `drag_end()`
//! settles the track, then `release()` decides whether the gesture was a tap
//! that activates a card.

use std::cmp::Ordering;
use std::time::Instant;

use cardeck_core::CarouselConfig;

use super::config::CarouselConfigExt;
use super::easing::EasingTypeExt;
use super::timing::{is_complete, lerp, progress};

/// Paint layer of the hovered or pressed slot; position-based layers stay
/// strictly below so hover always wins
const HOVER_LAYER: u16 = 30;
/// Lowest position-based paint layer
const BASE_LAYER: u16 = 10;

#[derive(Debug, Clone, Copy)]
struct DragGesture {
    origin_x: f64,
    base_offset: f64,
    /// Crossed the acquire threshold; the pointer owns the offset
    captured: bool,
    /// Crossed the click threshold at any point (sticky)
    moved: bool,
}

#[derive(Debug, Clone, Copy)]
struct PressOrigin {
    slot: usize,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy)]
struct SnapAnimation {
    started: Instant,
    from: f64,
    to: f64,
}

pub struct CarouselEngine {
    config: CarouselConfig,
    len: usize,
    copies: usize,
    virtual_index: usize,
    offset: f64,
    hovered: Option<usize>,
    drag: Option<DragGesture>,
    press: Option<PressOrigin>,
    snap: Option<SnapAnimation>,
    reseat_due: Option<Instant>,
    /// Whether the most recently ended gesture panned the track
    gesture_moved: bool,
}

impl CarouselEngine {
    pub fn new(len: usize, initial_index: usize, config: CarouselConfig) -> Self {
        let copies = copies_for(len, config.loop_enabled);
        let seed = if len == 0 {
            0
        } else {
            let clamped = initial_index.min(len - 1);
            if copies == 3 {
                len + clamped
            } else {
                clamped
            }
        };
        Self {
            config,
            len,
            copies,
            virtual_index: seed,
            offset: -(seed as f64) * config.step_px,
            hovered: None,
            drag: None,
            press: None,
            snap: None,
            reseat_due: None,
            gesture_moved: false,
        }
    }

    /// Replace the item list; position resets to `initial_index`
    pub fn reset(&mut self, len: usize, initial_index: usize) {
        *self = Self::new(len, initial_index, self.config);
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Looping is effective only with at least two cards
    pub fn can_loop(&self) -> bool {
        self.copies == 3
    }

    /// Number of virtual slots (`N * C`)
    pub fn total_slots(&self) -> usize {
        self.len * self.copies
    }

    fn last_slot(&self) -> usize {
        self.total_slots().saturating_sub(1)
    }

    pub fn virtual_index(&self) -> usize {
        self.virtual_index
    }

    /// Card shown in a virtual slot
    pub fn real_index(&self, slot: usize) -> usize {
        if self.len == 0 {
            0
        } else {
            slot % self.len
        }
    }

    /// Card the carousel is currently centred on
    pub fn current_real_index(&self) -> usize {
        self.real_index(self.virtual_index)
    }

    /// Current track translation in pixels (`<= 0`)
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Track x-position of a slot's left edge
    pub fn screen_x(&self, slot: usize) -> f64 {
        slot as f64 * self.config.step_px + self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.snap.is_some()
    }

    /// True while a frame-rate tick is needed (animation running or a
    /// re-seat still pending)
    pub fn needs_update(&self) -> bool {
        self.snap.is_some() || self.reseat_due.is_some()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Update the hovered slot from pointer motion (no button held)
    pub fn hover(&mut self, slot: Option<usize>) {
        self.hovered = slot;
    }

    /// Advance by one card, animated
    pub fn next(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }
        let target = (self.virtual_index + 1).min(self.last_slot());
        self.snap_to(target, now);
    }

    /// Step back by one card, animated
    pub fn prev(&mut self, now: Instant) {
        if self.is_empty() {
            return;
        }
        let target = self.virtual_index.saturating_sub(1);
        self.snap_to(target, now);
    }

    /// Jump to a card by real index, animated
    pub fn jump_to(&mut self, real_index: usize, now: Instant) {
        if self.is_empty() {
            return;
        }
        let clamped = real_index.min(self.len - 1);
        let target = if self.can_loop() { self.len + clamped } else { clamped };
        self.snap_to(target, now);
    }

    /// Begin a pointer gesture. The snap animation, if any, keeps running
    /// until the gesture is actually captured.
    pub fn drag_start(&mut self, x: f64) {
        if self.is_empty() {
            return;
        }
        self.gesture_moved = false;
        self.drag = Some(DragGesture {
            origin_x: x,
            base_offset: self.offset,
            captured: false,
            moved: false,
        });
    }

    /// Track pointer motion during a gesture
    pub fn drag_move(&mut self, x: f64) {
        let min = -(self.last_slot() as f64) * self.config.step_px;
        let acquire = self.config.drag_acquire_px;
        let click = self.config.click_threshold_px;

        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = x - drag.origin_x;

        if !drag.captured {
            if dx.abs() < acquire {
                return;
            }
            drag.captured = true;
            // Freeze wherever the animation had reached; the pointer owns
            // the offset from here. The pending re-seat is cancelled too --
            // the release snap schedules a fresh one.
            self.snap = None;
            self.reseat_due = None;
        }

        if dx.abs() >= click {
            drag.moved = true;
        }

        self.offset = (drag.base_offset + dx).clamp(min, 0.0);
    }

    /// Finish a pointer gesture: a captured pan snaps to the nearest card
    /// anchor, a tap leaves the position untouched so `release()` can fire
    /// the activation instead.
    pub fn drag_end(&mut self, now: Instant) {
        let Some(drag) = self.drag.take() else {
            self.gesture_moved = false;
            return;
        };
        self.gesture_moved = drag.captured && drag.moved;
        if !drag.captured {
            return;
        }
        self.press = None;
        let step = self.config.step_px;
        let nearest = (-self.offset / step).round() as i64;
        let nearest = nearest.clamp(0, self.last_slot() as i64) as usize;
        self.snap_to(nearest, now);
    }

    /// Record a press on a card face (sets the pressed/hover highlight)
    pub fn press(&mut self, slot: usize, x: f64, y: f64) {
        if self.is_empty() {
            return;
        }
        self.press = Some(PressOrigin { slot, x, y });
        self.hovered = Some(slot);
    }

    /// Resolve a pointer release into a card activation.
    ///
    /// Returns the activated card's real index when the gesture stayed a
    /// tap: never panned the track, released on the slot it pressed, and
    /// travelled at most the click threshold on both axes. Call after
    /// `drag_end()`.
    pub fn release(&mut self, slot: usize, x: f64, y: f64) -> Option<usize> {
        self.hovered = None;
        let press = self.press.take()?;
        if self.len == 0 || self.gesture_moved {
            return None;
        }
        if press.slot != slot {
            return None;
        }
        let click = self.config.click_threshold_px;
        if (x - press.x).abs() > click || (y - press.y).abs() > click {
            return None;
        }
        Some(self.real_index(slot))
    }

    /// Paint order for a slot: hovered/pressed always on top, otherwise
    /// slots nearer the viewport centre draw above their neighbours
    pub fn stack_order(&self, slot: usize, viewport_width: f64) -> u16 {
        let pressed = self.press.map(|p| p.slot);
        if self.hovered == Some(slot) || pressed == Some(slot) {
            return HOVER_LAYER;
        }

        let centre = viewport_width / 2.0;
        let half = self.config.card_width_px / 2.0;
        let mut slots = self.visible_slots(viewport_width);
        // Farthest from the centre paints first
        slots.sort_by(|a, b| {
            let da = (a.1 + half - centre).abs();
            let db = (b.1 + half - centre).abs();
            db.partial_cmp(&da).unwrap_or(Ordering::Equal)
        });
        let rank = slots.iter().position(|&(i, _)| i == slot).unwrap_or(0) as u16;
        (BASE_LAYER + rank).min(HOVER_LAYER - 1)
    }

    /// Topmost slot under an x-position, by paint order
    pub fn slot_at(&self, x: f64, viewport_width: f64) -> Option<usize> {
        let width = self.config.card_width_px;
        self.visible_slots(viewport_width)
            .into_iter()
            .filter(|&(_, sx)| x >= sx && x < sx + width)
            .max_by_key(|&(slot, _)| self.stack_order(slot, viewport_width))
            .map(|(slot, _)| slot)
    }

    /// Slots within the viewport plus one card of buffer on each side,
    /// paired with their track x-positions
    pub fn visible_slots(&self, viewport_width: f64) -> Vec<(usize, f64)> {
        if self.is_empty() {
            return Vec::new();
        }
        let width = self.config.card_width_px;
        let min_x = -width;
        let max_x = viewport_width + width;
        (0..self.total_slots())
            .filter_map(|slot| {
                let x = self.screen_x(slot);
                (x + width > min_x && x < max_x).then_some((slot, x))
            })
            .collect()
    }

    /// Advance the snap animation and apply a due re-seat.
    ///
    /// Call once per frame; returns the current offset. Safe to call at any
    /// rate: every transition recomputes from current state, so rapid
    /// repeated input cannot queue up.
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(anim) = self.snap {
            let duration = self.config.animation_duration();
            if is_complete(anim.started, now, duration) {
                self.offset = anim.to;
                self.snap = None;
            } else {
                let t = self.config.easing.apply(progress(anim.started, now, duration));
                self.offset = lerp(anim.from, anim.to, t);
            }
        }

        if let Some(due) = self.reseat_due {
            // Never re-seat mid-animation or mid-drag; the deadline simply
            // holds until the track is at rest.
            if now >= due && self.snap.is_none() && self.drag.is_none() {
                self.apply_reseat();
                self.reseat_due = None;
            }
        }

        self.offset
    }

    fn snap_to(&mut self, target: usize, now: Instant) {
        let target = target.min(self.last_slot());
        let to = -(target as f64) * self.config.step_px;
        if target == self.virtual_index && (to - self.offset).abs() < f64::EPSILON {
            return;
        }
        self.virtual_index = target;
        let duration = self.config.animation_duration();
        if duration.is_zero() {
            self.offset = to;
            self.snap = None;
        } else {
            self.snap = Some(SnapAnimation {
                started: now,
                from: self.offset,
                to,
            });
        }
        if self.can_loop() {
            self.reseat_due = Some(now + self.config.reseat_deadline());
        }
    }

    /// Silent correction back into the middle copy: same card, no animation
    fn apply_reseat(&mut self) {
        if !self.can_loop() {
            return;
        }
        let n = self.len;
        if self.virtual_index < n {
            self.virtual_index += n;
        } else if self.virtual_index >= 2 * n {
            self.virtual_index -= n;
        } else {
            return;
        }
        self.offset = -(self.virtual_index as f64) * self.config.step_px;
    }
}

fn copies_for(len: usize, loop_enabled: bool) -> usize {
    if loop_enabled && len >= 2 {
        3
    } else {
        1
    }
}
