//! Element types and render properties
//!
//! Layout decides where things go; [`RenderProps`] records how they look.
//! Builders produce both, and the [`RenderTree`](crate::RenderTree) joins
//! them after layout.

use gridview_core::{Color, CornerRadius, Point, Rect, Shadow};
use serde::{Deserialize, Serialize};
use taffy::Layout;

/// Element type identifier for downcasting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementTypeId {
    Div,
    Text,
    Image,
}

/// Computed layout bounds for an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    /// X position relative to the parent offset passed at lookup
    pub x: f32,
    /// Y position relative to the parent offset passed at lookup
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    /// Create bounds from a Taffy Layout with parent offset
    pub fn from_layout(layout: &Layout, parent_offset: (f32, f32)) -> Self {
        Self {
            x: parent_offset.0 + layout.location.x,
            y: parent_offset.1 + layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        }
    }

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Visual properties for rendering an element
#[derive(Clone, Debug, PartialEq)]
pub struct RenderProps {
    /// Solid background fill
    pub background: Option<Color>,
    /// Corner radius for rounded rectangles
    pub border_radius: CornerRadius,
    /// Drop shadow applied to this element
    pub shadow: Option<Shadow>,
    /// Opacity applied to this element and its subtree
    pub opacity: f32,
    /// Paint-time translation applied to this element and its subtree
    ///
    /// Translation never affects layout of siblings.
    pub translate: Point,
}

impl Default for RenderProps {
    fn default() -> Self {
        Self {
            background: None,
            border_radius: CornerRadius::ZERO,
            shadow: None,
            opacity: 1.0,
            translate: Point::ZERO,
        }
    }
}
