//! Div element builder
//!
//! A fluent builder for container elements:
//!
//! ```rust
//! use gridview_layout::prelude::*;
//!
//! let card = div()
//!     .flex_col()
//!     .items_center()
//!     .p_px(8.0)
//!     .bg(Color::WHITE)
//!     .rounded(10.0)
//!     .shadow(Shadow::elevation(10.0))
//!     .child(text("Make it Easy"));
//! ```

use gridview_core::{Color, CornerRadius, Point, Shadow};
use taffy::prelude::*;

use crate::element::{ElementTypeId, RenderProps};
use crate::error::Result;
use crate::image::ImageRenderInfo;
use crate::text::TextRenderInfo;
use crate::tree::{LayoutNodeId, LayoutTree};

/// A div element builder
pub struct Div {
    style: Style,
    children: Vec<Box<dyn ElementBuilder>>,
    background: Option<Color>,
    border_radius: CornerRadius,
    shadow: Option<Shadow>,
    opacity: f32,
    translate: Point,
}

impl Div {
    /// Create a new div element
    pub fn new() -> Self {
        Self {
            style: Style::default(),
            children: Vec::new(),
            background: None,
            border_radius: CornerRadius::ZERO,
            shadow: None,
            opacity: 1.0,
            translate: Point::ZERO,
        }
    }

    // =========================================================================
    // Display & Flex Direction
    // =========================================================================

    /// Set display to flex with row direction
    pub fn flex_row(mut self) -> Self {
        self.style.display = Display::Flex;
        self.style.flex_direction = FlexDirection::Row;
        self
    }

    /// Set display to flex with column direction
    pub fn flex_col(mut self) -> Self {
        self.style.display = Display::Flex;
        self.style.flex_direction = FlexDirection::Column;
        self
    }

    // =========================================================================
    // Flex Properties
    // =========================================================================

    /// Set flex-grow to 1 (element will grow to fill space)
    pub fn flex_grow(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self
    }

    /// Do not shrink below the content size
    pub fn flex_none(mut self) -> Self {
        self.style.flex_grow = 0.0;
        self.style.flex_shrink = 0.0;
        self
    }

    /// Grow and shrink from a zero basis, splitting space equally with siblings
    pub fn flex_1(mut self) -> Self {
        self.style.flex_grow = 1.0;
        self.style.flex_shrink = 1.0;
        self.style.flex_basis = Dimension::Length(0.0);
        self
    }

    // =========================================================================
    // Alignment
    // =========================================================================

    /// Center items along the cross axis
    pub fn items_center(mut self) -> Self {
        self.style.align_items = Some(AlignItems::Center);
        self
    }

    /// Center items along the main axis
    pub fn justify_center(mut self) -> Self {
        self.style.justify_content = Some(JustifyContent::Center);
        self
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Set width in pixels
    pub fn w(mut self, px: f32) -> Self {
        self.style.size.width = Dimension::Length(px);
        self
    }

    /// Set width to 100%
    pub fn w_full(mut self) -> Self {
        self.style.size.width = Dimension::Percent(1.0);
        self
    }

    /// Set height in pixels
    pub fn h(mut self, px: f32) -> Self {
        self.style.size.height = Dimension::Length(px);
        self
    }

    // =========================================================================
    // Spacing
    // =========================================================================

    /// Set padding on all sides in pixels
    pub fn p_px(mut self, px: f32) -> Self {
        let px = LengthPercentage::Length(px);
        self.style.padding = taffy::Rect {
            left: px,
            right: px,
            top: px,
            bottom: px,
        };
        self
    }

    // =========================================================================
    // Visual
    // =========================================================================

    pub fn bg(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Set uniform corner radius
    pub fn rounded(mut self, radius: f32) -> Self {
        self.border_radius = CornerRadius::uniform(radius);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Set opacity, clamped to 0.0..=1.0
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Translate along X at paint time
    pub fn translate_x(mut self, x: f32) -> Self {
        self.translate.x = x;
        self
    }

    /// Translate along Y at paint time
    pub fn translate_y(mut self, y: f32) -> Self {
        self.translate.y = y;
        self
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Add a child element
    pub fn child(mut self, child: impl ElementBuilder + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Add multiple children
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: ElementBuilder + 'static,
    {
        for child in children {
            self.children.push(Box::new(child));
        }
        self
    }
}

impl Default for Div {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for types that can build into layout elements
pub trait ElementBuilder: Send {
    /// Build this element into a layout tree, returning the node ID
    fn build(&self, tree: &mut LayoutTree) -> Result<LayoutNodeId>;

    /// Get the render properties for this element
    fn render_props(&self) -> RenderProps;

    /// Get children builders (for recursive traversal)
    fn children_builders(&self) -> &[Box<dyn ElementBuilder>];

    /// Get the element type identifier
    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Div
    }

    /// Get text render info if this is a text element
    fn text_render_info(&self) -> Option<TextRenderInfo> {
        None
    }

    /// Get image render info if this is an image element
    fn image_render_info(&self) -> Option<ImageRenderInfo> {
        None
    }
}

impl ElementBuilder for Div {
    fn build(&self, tree: &mut LayoutTree) -> Result<LayoutNodeId> {
        let node = tree.create_node(self.style.clone())?;
        for child in &self.children {
            let child_node = child.build(tree)?;
            tree.add_child(node, child_node)?;
        }
        Ok(node)
    }

    fn render_props(&self) -> RenderProps {
        RenderProps {
            background: self.background,
            border_radius: self.border_radius,
            shadow: self.shadow,
            opacity: self.opacity,
            translate: self.translate,
        }
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &self.children
    }
}

/// Convenience function to create a new div
pub fn div() -> Div {
    Div::new()
}
