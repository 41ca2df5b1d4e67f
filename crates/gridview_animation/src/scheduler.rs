//! Animation scheduler
//!
//! Owns every running tween and advances them on each host frame.
//! Tweens are registered implicitly through [`Animatable`](crate::Animatable);
//! components hold a weak [`SchedulerHandle`] so they never keep the
//! scheduler alive.
//!
//! The scheduler keeps its own virtual clock: time only moves when the host
//! calls [`AnimationScheduler::tick`]. This makes every animation fully
//! deterministic under test.
//!
//! The scheduler is single-threaded. It lives on the UI thread together with
//! the frame executor that drives animation tasks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::task::Waker;

use slotmap::{new_key_type, SlotMap};

use crate::error::{AnimationError, Result};
use crate::tween::Tween;

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

struct TweenSlot {
    tween: Tween<f32>,
    /// Woken once when the tween reaches its end value
    waker: Option<Waker>,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, TweenSlot>,
    now_ms: f64,
    frame: u64,
}

/// The animation scheduler that ticks all running tweens
///
/// # Example
///
/// ```rust
/// use gridview_animation::{tween, AnimationScheduler, Easing, Tween};
///
/// let scheduler = AnimationScheduler::new();
/// let handle = scheduler.handle();
/// let id = handle
///     .register_tween(Tween::new(0.0, 1.0, tween(100, Easing::Linear)))
///     .unwrap();
///
/// assert!(scheduler.tick(50.0));
/// assert_eq!(handle.tween_value(id), Some(0.5));
/// ```
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                now_ms: 0.0,
                frame: 0,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Advance the virtual clock by `dt_ms` and step every running tween
    ///
    /// Wakers of tweens that finished during this tick are woken after the
    /// scheduler state is released. Returns true if any tween is still
    /// running and needs another frame.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let (wakers, active) = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += dt_ms.max(0.0) as f64;
            inner.frame += 1;

            let mut wakers = Vec::new();
            let mut active = false;
            for (_, slot) in inner.tweens.iter_mut() {
                if slot.tween.is_finished() {
                    continue;
                }
                if slot.tween.advance(dt_ms) {
                    if let Some(waker) = slot.waker.take() {
                        wakers.push(waker);
                    }
                } else {
                    active = true;
                }
            }
            (wakers, active)
        };

        if !wakers.is_empty() {
            tracing::trace!("scheduler: {} tween(s) finished", wakers.len());
        }
        for waker in wakers {
            waker.wake();
        }
        active
    }

    /// Advance the clock by `frames` frames of `dt_ms` in one step
    ///
    /// Only allowed while no tween is running, since nothing is sampled in
    /// between. Returns false and leaves the clock alone otherwise.
    pub fn skip_idle_frames(&self, frames: u64, dt_ms: f32) -> bool {
        if self.has_active_animations() {
            return false;
        }
        let mut inner = self.inner.borrow_mut();
        inner.now_ms += frames as f64 * dt_ms.max(0.0) as f64;
        inner.frame += frames;
        true
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    /// Number of frames ticked so far
    pub fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }

    /// Number of registered tweens, finished or not
    pub fn tween_count(&self) -> usize {
        self.inner.borrow().tweens.len()
    }

    /// Check if any tween is still running
    pub fn has_active_animations(&self) -> bool {
        self.inner
            .borrow()
            .tweens
            .iter()
            .any(|(_, slot)| !slot.tween.is_finished())
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the animation scheduler
///
/// Passed to components that register tweens. Operations on a handle whose
/// scheduler has been dropped fail with [`AnimationError::SchedulerDropped`]
/// or return `None`.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    fn upgrade(&self) -> Result<Rc<RefCell<SchedulerInner>>> {
        self.inner.upgrade().ok_or(AnimationError::SchedulerDropped)
    }

    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween<f32>) -> Result<TweenId> {
        let inner = self.upgrade()?;
        let id = inner
            .borrow_mut()
            .tweens
            .insert(TweenSlot { tween, waker: None });
        Ok(id)
    }

    /// Current value of a tween
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let guard = inner.borrow();
        guard.tweens.get(id).map(|slot| slot.tween.value())
    }

    /// Check if a tween has reached its end value
    pub fn is_tween_finished(&self, id: TweenId) -> Result<bool> {
        let inner = self.upgrade()?;
        let guard = inner.borrow();
        guard
            .tweens
            .get(id)
            .map(|slot| slot.tween.is_finished())
            .ok_or_else(|| AnimationError::UnknownTween(format!("{id:?}")))
    }

    /// Register a waker to be woken when the tween finishes
    ///
    /// Replaces any previously registered waker.
    pub fn set_tween_waker(&self, id: TweenId, waker: &Waker) -> Result<()> {
        let inner = self.upgrade()?;
        let mut guard = inner.borrow_mut();
        let slot = guard
            .tweens
            .get_mut(id)
            .ok_or_else(|| AnimationError::UnknownTween(format!("{id:?}")))?;
        match &slot.waker {
            Some(existing) if existing.will_wake(waker) => {}
            _ => slot.waker = Some(waker.clone()),
        }
        Ok(())
    }

    /// Remove a tween, returning it if it was registered
    pub fn remove_tween(&self, id: TweenId) -> Option<Tween<f32>> {
        let inner = self.inner.upgrade()?;
        let removed = inner.borrow_mut().tweens.remove(id);
        removed.map(|slot| slot.tween)
    }

    /// Current virtual time of the scheduler
    pub fn now_ms(&self) -> Option<f64> {
        self.inner.upgrade().map(|inner| inner.borrow().now_ms)
    }
}
