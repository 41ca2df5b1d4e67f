//! Gridview Application Runtime
//!
//! The animated grid screen and the runtime that plays it: mount-scoped
//! effects on a frame executor, a virtualized grid, and a headless host
//! driven by platform-style events on a virtual clock.
//!
//! # Example
//!
//! ```rust
//! use gridview_app::prelude::*;
//!
//! let mut host = HeadlessHost::new(GridConfig::default()).unwrap();
//!
//! let item = host.snapshot().items[0].clone();
//! assert_eq!((item.offset_x, item.opacity), (-300.0, 0.0));
//!
//! host.advance_by(1000.0).unwrap();
//! assert!(host.snapshot().all_settled());
//! ```

mod component;
mod config;
mod content;
mod effect;
mod error;
mod executor;
mod host;
mod item;
mod screen;
mod snapshot;

#[cfg(test)]
mod tests;

pub use component::Component;
pub use config::GridConfig;
pub use content::StaticItemContent;
pub use effect::LaunchedEffect;
pub use error::{AppError, Result};
pub use executor::{FrameExecutor, Spawner, TaskHandle, TaskId};
pub use host::HeadlessHost;
pub use item::{
    grid_item_card, AnimatedGridItem, EntrancePhase, EntranceSpec, GridItemViewState,
    MountContext,
};
pub use screen::{grid_view_animation, grid_view_animation_with, top_bar, GridScreen, TITLE};
pub use snapshot::{FrameSnapshot, ItemSnapshot};

// Re-export layout API for convenience
pub use gridview_layout::RenderTree;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::component::Component;
    pub use crate::config::GridConfig;
    pub use crate::content::StaticItemContent;
    pub use crate::error::{AppError, Result};
    pub use crate::host::HeadlessHost;
    pub use crate::item::{AnimatedGridItem, EntrancePhase, GridItemViewState};
    pub use crate::screen::{grid_view_animation, GridScreen};
    pub use crate::snapshot::{FrameSnapshot, ItemSnapshot};

    // Layout builders
    pub use gridview_layout::prelude::*;

    // Core types
    pub use gridview_core::{ControlFlow, Event, LifecycleEvent, Point, Rect, Size};
}
