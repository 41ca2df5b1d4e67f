//! Gridview Animation System
//!
//! Time-based value animation driven by a host frame clock.
//!
//! # Features
//!
//! - **Easing Curves**: Linear, CSS-style and Material cubic-bezier curves
//! - **Tweens**: Pure `value(t) = lerp(from, to, curve(t / duration))` sampling
//! - **Scheduler**: Single-threaded owner of running tweens with a virtual clock
//! - **Animatable**: Shareable animated scalar with an awaitable `animate_to`
//!
//! # Example
//!
//! ```rust
//! use gridview_animation::{tween, AnimationScheduler, Animatable, Easing};
//!
//! let scheduler = AnimationScheduler::new();
//! let offset = Animatable::new(scheduler.handle(), -300.0);
//!
//! // Nothing moves until the future is polled by an executor.
//! let _slide = offset.animate_to(0.0, tween(300, Easing::Linear));
//! assert_eq!(offset.value(), -300.0);
//! ```

pub mod animatable;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use animatable::{AnimateTo, Animatable, AnimationEnd};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TweenId};
pub use tween::{tween, Tween, TweenSpec};
pub use values::Interpolate;
