//! Application error types

use std::path::PathBuf;

use gridview_animation::AnimationError;
use gridview_layout::LayoutError;
use thiserror::Error;

/// Errors raised by the grid runtime
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// The frame executor was dropped while tasks were still being spawned
    #[error("frame executor has been dropped")]
    ExecutorDropped,

    /// The host was destroyed and no longer accepts work
    #[error("host has been destroyed")]
    HostDestroyed,
}

/// Result type for application operations
pub type Result<T> = std::result::Result<T, AppError>;
