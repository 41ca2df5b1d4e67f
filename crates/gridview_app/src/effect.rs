//! Mount-scoped effects
//!
//! A [`LaunchedEffect`] runs a task once when a component mounts and
//! cancels it when the component goes away. There is no restart: a
//! component that mounts again launches a fresh effect.

use std::fmt::Display;
use std::future::Future;

use crate::error::Result;
use crate::executor::{Spawner, TaskHandle};

/// A task bound to a component's mount lifetime
///
/// Dropping the effect cancels its task.
pub struct LaunchedEffect {
    label: String,
    task: Option<TaskHandle>,
}

impl LaunchedEffect {
    /// Spawn `future` on the frame executor
    pub fn launch<F, E>(spawner: &Spawner, label: impl Into<String>, future: F) -> Result<Self>
    where
        F: Future<Output = std::result::Result<(), E>> + 'static,
        E: Display + 'static,
    {
        let label = label.into();
        let task = spawner.spawn(label.clone(), future)?;
        Ok(Self {
            label,
            task: Some(task),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cancel the task if it is still running
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("cancelling effect {}", self.label);
            }
            task.cancel();
        }
    }

    /// Check if the task is still running
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for LaunchedEffect {
    fn drop(&mut self) {
        self.cancel();
    }
}
