//! Text element builder
//!
//! ```rust
//! use gridview_layout::prelude::*;
//!
//! let subtitle = text("Jetpack Compose is the next thing for Android.")
//!     .size(14.0)
//!     .color(Color::GRAY)
//!     .max_lines(1)
//!     .ellipsis();
//! ```

use gridview_core::Color;
use serde::{Deserialize, Serialize};
use taffy::prelude::*;

use crate::div::ElementBuilder;
use crate::element::{ElementTypeId, RenderProps};
use crate::error::Result;
use crate::tree::{LayoutNodeId, LayoutTree, TextMeasureContext};

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Bold,
}

impl FontWeight {
    /// Numeric weight (100-900)
    pub fn weight(&self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
        }
    }
}

/// What to do with text that does not fit its line budget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOverflow {
    #[default]
    Clip,
    Ellipsis,
}

/// Text render data extracted from the element
#[derive(Clone, Debug, PartialEq)]
pub struct TextRenderInfo {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub weight: FontWeight,
    pub max_lines: Option<u32>,
    pub overflow: TextOverflow,
}

/// A text element builder
pub struct Text {
    content: String,
    font_size: f32,
    color: Color,
    align: TextAlign,
    weight: FontWeight,
    max_lines: Option<u32>,
    overflow: TextOverflow,
    style: Style,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: 14.0,
            color: Color::BLACK,
            align: TextAlign::Left,
            weight: FontWeight::Normal,
            max_lines: None,
            overflow: TextOverflow::Clip,
            style: Style::default(),
        }
    }

    /// Set the font size in pixels
    pub fn size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Limit the text to `lines` lines
    pub fn max_lines(mut self, lines: u32) -> Self {
        self.max_lines = Some(lines.max(1));
        self
    }

    /// End overflowing text with an ellipsis
    pub fn ellipsis(mut self) -> Self {
        self.overflow = TextOverflow::Ellipsis;
        self
    }

    /// Fill the parent's width
    pub fn w_full(mut self) -> Self {
        self.style.size.width = Dimension::Percent(1.0);
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }
}

impl ElementBuilder for Text {
    fn build(&self, tree: &mut LayoutTree) -> Result<LayoutNodeId> {
        tree.create_text_node(
            self.style.clone(),
            TextMeasureContext {
                content: self.content.clone(),
                font_size: self.font_size,
                max_lines: self.max_lines,
            },
        )
    }

    fn render_props(&self) -> RenderProps {
        RenderProps::default()
    }

    fn children_builders(&self) -> &[Box<dyn ElementBuilder>] {
        &[]
    }

    fn element_type_id(&self) -> ElementTypeId {
        ElementTypeId::Text
    }

    fn text_render_info(&self) -> Option<TextRenderInfo> {
        Some(TextRenderInfo {
            content: self.content.clone(),
            font_size: self.font_size,
            color: self.color,
            align: self.align,
            weight: self.weight,
            max_lines: self.max_lines,
            overflow: self.overflow,
        })
    }
}

/// Convenience function to create a new text element
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_render_info() {
        let t = text("Make it Easy")
            .size(16.0)
            .align(TextAlign::Center)
            .weight(FontWeight::Bold);
        let info = t.text_render_info().unwrap();
        assert_eq!(info.content, "Make it Easy");
        assert_eq!(info.font_size, 16.0);
        assert_eq!(info.align, TextAlign::Center);
        assert_eq!(info.weight.weight(), 700);
        assert_eq!(t.element_type_id(), ElementTypeId::Text);
    }

    #[test]
    fn test_max_lines_is_at_least_one() {
        let info = text("x").max_lines(0).ellipsis().text_render_info().unwrap();
        assert_eq!(info.max_lines, Some(1));
        assert_eq!(info.overflow, TextOverflow::Ellipsis);
    }
}
