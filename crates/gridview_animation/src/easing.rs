//! Easing curves
//!
//! An easing curve maps normalized elapsed time in `[0, 1]` to normalized
//! progress. Every curve maps 0 to 0 and 1 to 1 exactly.

/// Easing curve
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Constant rate
    Linear,
    /// CSS `ease-in`
    EaseIn,
    /// CSS `ease-out`
    EaseOut,
    /// CSS `ease-in-out`
    EaseInOut,
    /// Material standard curve, the default for tweens
    #[default]
    FastOutSlowIn,
    /// Material deceleration curve
    LinearOutSlowIn,
    /// Material acceleration curve
    FastOutLinearIn,
    /// Custom cubic bezier with control points (x1, y1) and (x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the curve to normalized time `t`
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, t),
            Easing::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

// Bezier polynomial with P0 = 0 and P3 = 1, evaluated per axis.
fn sample(a1: f32, a2: f32, s: f32) -> f32 {
    ((1.0 - 3.0 * a2 + 3.0 * a1) * s + (3.0 * a2 - 6.0 * a1)) * s * s + 3.0 * a1 * s
}

fn slope(a1: f32, a2: f32, s: f32) -> f32 {
    3.0 * (1.0 - 3.0 * a2 + 3.0 * a1) * s * s + 2.0 * (3.0 * a2 - 6.0 * a1) * s + 3.0 * a1
}

const EPSILON: f32 = 1e-6;

/// Evaluate a unit cubic bezier at horizontal position `x`
///
/// Solves for the curve parameter with Newton-Raphson, falling back to
/// bisection when the slope flattens out.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = sample(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return sample(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < EPSILON {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..64 {
        let value = sample(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    sample(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 8] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinearIn,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?}");
        }
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Easing::FastOutSlowIn.apply(-1.0), 0.0);
        assert_eq!(Easing::FastOutSlowIn.apply(3.0), 1.0);
    }

    #[test]
    fn test_linear_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((Easing::Linear.apply(t) - t).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v + 1e-5 >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_fast_out_slow_in_shape() {
        // Front-loaded: past the halfway mark by mid-time
        let mid = Easing::FastOutSlowIn.apply(0.5);
        assert!(mid > 0.7 && mid < 0.85, "mid = {mid}");
        assert!(Easing::FastOutSlowIn.apply(0.1) < 0.1);
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-3);
    }
}
