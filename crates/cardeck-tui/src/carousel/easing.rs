//! Easing curves for the snap animation.
//!
//! The variant set lives in `cardeck-core` so the config file can name a
//! curve; the math lives here. Every curve maps [0, 1] onto [0, 1].

pub use cardeck_core::EasingType;

/// Extension trait attaching the curve math to the config enum
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Step function: hold the start, jump at the end
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut => ease_out_expo(t),
        }
    }
}

/// Polynomial ease-out: f(t) = 1 - (1-t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t), pinned to 1 at t = 1
#[inline]
fn ease_out_expo(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingType; 5] = [
        EasingType::None,
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_ends_at_one() {
        for easing in ALL {
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_starts_at_zero() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
        }
    }

    #[test]
    fn test_monotonic_nondecreasing() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = easing.apply(i as f64 / 20.0);
                assert!(v + 1e-9 >= prev, "{:?} decreased at step {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        assert!(EasingType::Linear.apply(-0.5).abs() < 0.001);
        assert!((EasingType::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_ease_out_front_loaded() {
        // An ease-out curve covers more than half the distance by t = 0.5
        for easing in [EasingType::Cubic, EasingType::Quintic, EasingType::EaseOut] {
            assert!(easing.apply(0.5) > 0.5, "{:?} not front-loaded", easing);
        }
    }
}
