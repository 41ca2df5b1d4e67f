//! Duration-based tweens
//!
//! A tween ramps a value from `from` to `to` over a fixed duration:
//!
//! ```text
//! value(t) = lerp(from, to, easing((t - delay) / duration))
//! ```
//!
//! Sampling is a pure function of elapsed time, so a tween can be evaluated
//! at any instant without stepping through intermediate frames.

use crate::easing::Easing;
use crate::values::Interpolate;

/// Timing configuration for a tween
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    /// Duration of the ramp in milliseconds
    pub duration_ms: f32,
    /// Delay before the ramp starts in milliseconds
    pub delay_ms: f32,
    /// Interpolation curve
    pub easing: Easing,
}

impl Default for TweenSpec {
    /// 300ms with the standard FastOutSlowIn curve
    fn default() -> Self {
        Self {
            duration_ms: 300.0,
            delay_ms: 0.0,
            easing: Easing::FastOutSlowIn,
        }
    }
}

impl TweenSpec {
    /// Set a start delay
    pub fn delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms as f32;
        self
    }

    /// Delay plus duration
    pub fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }
}

/// Create a tween spec with the given duration and easing
pub fn tween(duration_ms: u32, easing: Easing) -> TweenSpec {
    TweenSpec {
        duration_ms: duration_ms as f32,
        delay_ms: 0.0,
        easing,
    }
}

/// A running tween between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate = f32> {
    from: T,
    to: T,
    spec: TweenSpec,
    elapsed_ms: f32,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, spec: TweenSpec) -> Self {
        Self {
            from,
            to,
            spec,
            elapsed_ms: 0.0,
        }
    }

    /// Sample the tween at an arbitrary elapsed time
    pub fn value_at(&self, elapsed_ms: f32) -> T {
        if elapsed_ms <= self.spec.delay_ms && self.spec.duration_ms > 0.0 {
            return self.from.clone();
        }
        if self.spec.duration_ms <= 0.0 {
            return self.to.clone();
        }
        let t = (elapsed_ms - self.spec.delay_ms) / self.spec.duration_ms;
        if t >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.spec.easing.apply(t))
    }

    /// Current value
    pub fn value(&self) -> T {
        self.value_at(self.elapsed_ms)
    }

    /// Advance the tween clock
    ///
    /// Returns `true` once the tween has reached its end value.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if !self.is_finished() {
            self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.spec.total_ms());
        }
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.spec.total_ms()
    }

    /// Normalized progress through delay plus duration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let total = self.spec.total_ms();
        if total <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / total).clamp(0.0, 1.0)
        }
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn from(&self) -> &T {
        &self.from
    }

    pub fn to(&self) -> &T {
        &self.to
    }

    pub fn spec(&self) -> &TweenSpec {
        &self.spec
    }
}
