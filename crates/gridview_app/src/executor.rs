//! Frame executor
//!
//! A single-threaded executor for UI tasks. The host drains it once per
//! frame with [`FrameExecutor::run_until_stalled`], right after ticking the
//! animation scheduler, so a task awaiting an animation resumes in the same
//! frame the animation finished.
//!
//! Only tasks whose waker fired since their last poll are polled again.

use std::cell::RefCell;
use std::fmt::Display;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{AbortHandle, Abortable, Aborted, FutureExt, LocalBoxFuture};
use futures::task::{waker, ArcWake};
use slotmap::{new_key_type, SlotMap};

use crate::error::{AppError, Result};

new_key_type! {
    /// Handle to a spawned task
    pub struct TaskId;
}

/// Ready flag set by a task's waker
struct ReadyFlag(AtomicBool);

impl ArcWake for ReadyFlag {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.0.store(true, Ordering::Release);
    }
}

struct Task {
    label: String,
    /// `None` while the task is being polled
    future: Option<LocalBoxFuture<'static, ()>>,
    ready: Arc<ReadyFlag>,
}

struct ExecutorInner {
    tasks: SlotMap<TaskId, Task>,
}

/// A single-threaded, frame-driven async executor
pub struct FrameExecutor {
    inner: Rc<RefCell<ExecutorInner>>,
}

impl FrameExecutor {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ExecutorInner {
                tasks: SlotMap::with_key(),
            })),
        }
    }

    /// Get a spawner for handing to components
    pub fn spawner(&self) -> Spawner {
        Spawner {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Poll every woken task until none is ready
    ///
    /// Returns the number of polls performed.
    pub fn run_until_stalled(&self) -> usize {
        let mut polled = 0;
        loop {
            let ready: Vec<TaskId> = {
                let inner = self.inner.borrow();
                inner
                    .tasks
                    .iter()
                    .filter(|(_, task)| task.future.is_some())
                    .filter(|(_, task)| task.ready.0.swap(false, Ordering::AcqRel))
                    .map(|(id, _)| id)
                    .collect()
            };
            if ready.is_empty() {
                break;
            }
            for id in ready {
                if self.poll_task(id) {
                    polled += 1;
                }
            }
        }
        polled
    }

    /// Poll one task with the executor state released
    fn poll_task(&self, id: TaskId) -> bool {
        let (mut future, ready) = {
            let mut inner = self.inner.borrow_mut();
            let Some(task) = inner.tasks.get_mut(id) else {
                return false;
            };
            let Some(future) = task.future.take() else {
                return false;
            };
            (future, task.ready.clone())
        };

        let task_waker = waker(ready);
        let mut cx = Context::from_waker(&task_waker);
        match future.as_mut().poll(&mut cx) {
            Poll::Ready(()) => {
                let removed = self.inner.borrow_mut().tasks.remove(id);
                if let Some(task) = removed {
                    tracing::trace!("task {} done", task.label);
                }
            }
            Poll::Pending => {
                let orphan = {
                    let mut inner = self.inner.borrow_mut();
                    match inner.tasks.get_mut(id) {
                        Some(task) => {
                            task.future = Some(future);
                            None
                        }
                        // Cancelled while being polled
                        None => Some(future),
                    }
                };
                drop(orphan);
            }
        }
        true
    }

    /// Number of live tasks
    pub fn task_count(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.borrow().tasks.is_empty()
    }

    /// Drop every task without polling it again
    pub fn clear(&self) {
        let tasks: Vec<Task> = {
            let mut inner = self.inner.borrow_mut();
            inner.tasks.drain().map(|(_, task)| task).collect()
        };
        if !tasks.is_empty() {
            tracing::debug!("executor: dropping {} task(s)", tasks.len());
        }
        drop(tasks);
    }
}

impl Default for FrameExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle for spawning tasks onto a [`FrameExecutor`]
#[derive(Clone)]
pub struct Spawner {
    inner: Weak<RefCell<ExecutorInner>>,
}

impl Spawner {
    /// Spawn a fallible task
    ///
    /// The task is polled on the next [`FrameExecutor::run_until_stalled`].
    /// An error returned by the task is logged, not propagated.
    pub fn spawn<F, E>(&self, label: impl Into<String>, future: F) -> Result<TaskHandle>
    where
        F: Future<Output = std::result::Result<(), E>> + 'static,
        E: Display + 'static,
    {
        let inner = self.inner.upgrade().ok_or(AppError::ExecutorDropped)?;
        let label = label.into();
        let (abort, registration) = AbortHandle::new_pair();

        let task_label = label.clone();
        let wrapped = async move {
            match Abortable::new(future, registration).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("task {} failed: {}", task_label, e),
                Err(Aborted) => tracing::trace!("task {} aborted", task_label),
            }
        };

        let id = inner.borrow_mut().tasks.insert(Task {
            label: label.clone(),
            future: Some(wrapped.boxed_local()),
            ready: Arc::new(ReadyFlag(AtomicBool::new(true))),
        });
        tracing::trace!("spawned task {}", label);

        Ok(TaskHandle {
            id,
            abort,
            executor: self.inner.clone(),
        })
    }
}

/// Handle to a spawned task
///
/// Dropping the handle detaches the task; use [`TaskHandle::cancel`] to stop it.
pub struct TaskHandle {
    id: TaskId,
    abort: AbortHandle,
    executor: Weak<RefCell<ExecutorInner>>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Stop the task
    ///
    /// The task's future is dropped immediately, or as soon as its current
    /// poll returns if it is running.
    pub fn cancel(&self) {
        self.abort.abort();
        let Some(inner) = self.executor.upgrade() else {
            return;
        };
        let removed = match inner.try_borrow_mut() {
            Ok(mut inner) => inner.tasks.remove(self.id),
            // Cancelled from inside another task's poll; the abort is seen on
            // the task's next poll
            Err(_) => None,
        };
        drop(removed);
    }

    /// Check if the task has completed or been cancelled
    pub fn is_finished(&self) -> bool {
        if self.abort.is_aborted() {
            return true;
        }
        match self.executor.upgrade() {
            Some(inner) => !inner.borrow().tasks.contains_key(self.id),
            None => true,
        }
    }
}
