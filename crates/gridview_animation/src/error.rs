//! Animation error types

use thiserror::Error;

/// Animation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The scheduler behind a handle has been dropped
    #[error("animation scheduler has been dropped")]
    SchedulerDropped,

    /// A tween id no longer refers to a registered tween
    #[error("tween {0} is not registered with the scheduler")]
    UnknownTween(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
