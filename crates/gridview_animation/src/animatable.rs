//! Animatable scalar values
//!
//! An [`Animatable`] holds a single `f32` that can be animated towards a
//! target with [`Animatable::animate_to`]. The returned future registers a
//! tween with the scheduler on first poll and resolves once the scheduler
//! reports that tween finished, which lets an animation sequence be written
//! as plain `async` code:
//!
//! ```ignore
//! offset.animate_to(0.0, tween(300, Easing::Linear)).await?;
//! opacity.animate_to(1.0, tween(600, Easing::FastOutSlowIn)).await?;
//! ```
//!
//! Only one animation runs per value. Starting a new one interrupts the
//! previous future, which resolves with [`AnimationEnd::Interrupted`].
//! Dropping a running future stops its tween and leaves the value where it
//! was last sampled.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::error::Result;
use crate::scheduler::{SchedulerHandle, TweenId};
use crate::tween::{Tween, TweenSpec};

/// How an `animate_to` call ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The value reached its target
    Finished,
    /// Another animation, a snap or a stop took over before the target was reached
    Interrupted,
}

struct AnimatableInner {
    handle: SchedulerHandle,
    value: f32,
    target: f32,
    running: Option<TweenId>,
    /// Bumped whenever the running animation is replaced or stopped
    generation: u64,
    /// Waker of the future awaiting the running animation
    waiter: Option<Waker>,
}

impl AnimatableInner {
    fn sample(&mut self) -> f32 {
        if let Some(id) = self.running {
            if let Some(value) = self.handle.tween_value(id) {
                self.value = value;
            }
        }
        self.value
    }

    fn interrupt(&mut self) {
        self.sample();
        if let Some(id) = self.running.take() {
            self.handle.remove_tween(id);
        }
        self.generation += 1;
        if let Some(waker) = self.waiter.take() {
            waker.wake();
        }
    }
}

/// A shareable animated scalar
///
/// Clones share the same underlying value.
#[derive(Clone)]
pub struct Animatable {
    inner: Rc<RefCell<AnimatableInner>>,
}

impl Animatable {
    /// Create a value resting at `initial`
    pub fn new(handle: SchedulerHandle, initial: f32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(AnimatableInner {
                handle,
                value: initial,
                target: initial,
                running: None,
                generation: 0,
                waiter: None,
            })),
        }
    }

    /// Current value, sampled from the running tween if there is one
    pub fn value(&self) -> f32 {
        self.inner.borrow_mut().sample()
    }

    /// Target of the running animation, or the resting value
    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running.is_some()
    }

    /// Jump to `value` immediately, interrupting any running animation
    pub fn snap_to(&self, value: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.interrupt();
        inner.value = value;
        inner.target = value;
    }

    /// Stop the running animation at its current value
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.interrupt();
        inner.target = inner.value;
    }

    /// Animate from the current value to `target`
    ///
    /// Nothing happens until the returned future is first polled.
    pub fn animate_to(&self, target: f32, spec: TweenSpec) -> AnimateTo {
        AnimateTo {
            animatable: self.clone(),
            target,
            spec,
            started: None,
            done: false,
        }
    }
}

/// Future returned by [`Animatable::animate_to`]
#[must_use = "animations do nothing unless polled"]
pub struct AnimateTo {
    animatable: Animatable,
    target: f32,
    spec: TweenSpec,
    started: Option<(TweenId, u64)>,
    done: bool,
}

impl Future for AnimateTo {
    type Output = Result<AnimationEnd>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(Ok(AnimationEnd::Finished));
        }

        let mut inner = this.animatable.inner.borrow_mut();

        let (id, generation) = match this.started {
            Some(started) => started,
            None => {
                inner.interrupt();
                let from = inner.value;
                let tween = Tween::new(from, this.target, this.spec);
                let id = match inner.handle.register_tween(tween) {
                    Ok(id) => id,
                    Err(e) => {
                        this.done = true;
                        return Poll::Ready(Err(e));
                    }
                };
                inner.running = Some(id);
                inner.target = this.target;
                tracing::trace!(
                    "animate_to: {} -> {} over {}ms",
                    from,
                    this.target,
                    this.spec.duration_ms
                );
                let started = (id, inner.generation);
                this.started = Some(started);
                started
            }
        };

        if inner.generation != generation {
            this.done = true;
            return Poll::Ready(Ok(AnimationEnd::Interrupted));
        }

        match inner.handle.is_tween_finished(id) {
            Ok(true) => {
                inner.handle.remove_tween(id);
                inner.running = None;
                inner.waiter = None;
                inner.value = this.target;
                this.done = true;
                Poll::Ready(Ok(AnimationEnd::Finished))
            }
            Ok(false) => match inner.handle.set_tween_waker(id, cx.waker()) {
                Ok(()) => {
                    inner.waiter = Some(cx.waker().clone());
                    Poll::Pending
                }
                Err(e) => {
                    inner.running = None;
                    this.done = true;
                    Poll::Ready(Err(e))
                }
            },
            Err(e) => {
                inner.running = None;
                this.done = true;
                Poll::Ready(Err(e))
            }
        }
    }
}

impl Drop for AnimateTo {
    fn drop(&mut self) {
        let Some((_, generation)) = self.started else {
            return;
        };
        if self.done {
            return;
        }
        if let Ok(mut inner) = self.animatable.inner.try_borrow_mut() {
            if inner.generation == generation {
                inner.waiter = None;
                inner.interrupt();
                inner.target = inner.value;
            }
        }
    }
}
