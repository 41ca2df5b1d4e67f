//! Gridview Layout Engine
//!
//! Flexbox layout powered by Taffy with a fluent builder API, plus the
//! geometry behind the virtualized grid.
//!
//! # Example
//!
//! ```rust
//! use gridview_layout::prelude::*;
//!
//! let ui = div()
//!     .flex_col()
//!     .w(360.0)
//!     .h(640.0)
//!     .child(text("Gridview Animation").size(20.0).align(TextAlign::Center))
//!     .child(div().flex_grow());
//!
//! let mut tree = RenderTree::from_element(&ui).unwrap();
//! tree.compute_layout(360.0, 640.0).unwrap();
//! assert_eq!(tree.nodes().len(), 3);
//! ```

pub mod div;
pub mod element;
pub mod error;
pub mod grid;
pub mod image;
pub mod renderer;
pub mod scroll;
pub mod text;
pub mod text_measure;
pub mod tree;

pub use div::{div, Div, ElementBuilder};
pub use element::{ElementBounds, ElementTypeId, RenderProps};
pub use error::{LayoutError, Result};
pub use grid::{GridCell, LazyGrid};
pub use crate::image::{image, ClipShape, Image, ImageData, ImageRenderInfo, ObjectFit};
pub use renderer::{DecodedImage, RenderNode, RenderTree};
pub use scroll::ScrollState;
pub use text::{text, FontWeight, Text, TextAlign, TextRenderInfo, TextOverflow};
pub use text_measure::{
    clear_text_measurer, measure_text, set_text_measurer, text_measurer, truncate_to_width, EstimatedTextMeasurer, TextMeasurer,
    TextMetrics,
};
pub use tree::{LayoutNodeId, LayoutTree};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::div::{div, Div, ElementBuilder};
    pub use crate::element::{ElementBounds, ElementTypeId, RenderProps};
    pub use crate::grid::{GridCell, LazyGrid};
    pub use crate::image::{image, ClipShape, Image, ObjectFit};
    pub use crate::renderer::{DecodedImage, RenderNode, RenderTree};
    pub use crate::scroll::ScrollState;
    pub use crate::text::{text, FontWeight, Text, TextAlign, TextOverflow};
    pub use gridview_core::{Color, CornerRadius, Shadow};
}
