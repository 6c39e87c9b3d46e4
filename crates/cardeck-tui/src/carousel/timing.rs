//! Animation time helpers.
//!
//! Pure functions over explicit `(start, now)` pairs; nothing in here reads
//! the wall clock, which keeps the engine deterministic under test.

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at time `now`
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Whether an animation that started at `start` has run its full duration
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values, `t` in [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_midway() {
        let start = Instant::now();
        let now = start + Duration::from_millis(50);
        let p = progress(start, now, Duration::from_millis(100));
        assert!((p - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_progress_clamps_past_end() {
        let start = Instant::now();
        let now = start + Duration::from_secs(10);
        assert!((progress(start, now, Duration::from_millis(100)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_before_start() {
        // now earlier than start must not underflow
        let now = Instant::now();
        let start = now + Duration::from_millis(100);
        assert!((progress(start, now, Duration::from_millis(100)) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let start = Instant::now();
        assert!(is_complete(start, start, Duration::ZERO));
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert!((lerp(-1000.0, -1200.0, 0.0) + 1000.0).abs() < 0.001);
        assert!((lerp(-1000.0, -1200.0, 1.0) + 1200.0).abs() < 0.001);
        assert!((lerp(-1000.0, -1200.0, 0.5) + 1100.0).abs() < 0.001);
    }
}
