//! Gridview Core
//!
//! Foundational value types shared by every Gridview crate:
//!
//! - **Geometry**: points, sizes and rectangles in logical pixels
//! - **Paint values**: colors, corner radii and drop shadows
//! - **Host events**: the frame/scroll/lifecycle events a host feeds the runtime
//!
//! # Example
//!
//! ```rust
//! use gridview_core::{Color, Rect};
//!
//! let card = Rect::new(10.0, 10.0, 160.0, 160.0);
//! assert!(card.contains(gridview_core::Point::new(20.0, 20.0)));
//!
//! let faded = Color::lerp(&Color::TRANSPARENT, &Color::WHITE, 0.5);
//! assert_eq!(faded.a, 0.5);
//! ```

pub mod event;
pub mod geometry;

pub use event::{ControlFlow, Event, LifecycleEvent};
pub use geometry::{Color, CornerRadius, Point, Rect, Shadow, Size};
