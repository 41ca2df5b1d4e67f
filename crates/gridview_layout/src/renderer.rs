//! Render tree
//!
//! Joins a built element tree with its computed layout. [`RenderTree::nodes`]
//! flattens the result in paint order, resolving absolute bounds, inherited
//! translation and opacity, and the text each line actually displays.

use gridview_core::{Color, CornerRadius, Rect, Shadow};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::div::ElementBuilder;
use crate::element::{ElementTypeId, RenderProps};
use crate::error::{LayoutError, Result};
use crate::image::{ImageData, ImageRenderInfo};
use crate::text::{TextAlign, TextOverflow, TextRenderInfo};
use crate::text_measure::{text_measurer, truncate_to_width, TextMeasurer, LINE_HEIGHT};
use crate::tree::{LayoutNodeId, LayoutTree};

/// Render data collected for one layout node
#[derive(Clone, Debug)]
struct ElementRecord {
    kind: ElementTypeId,
    props: RenderProps,
    text: Option<TextRenderInfo>,
    image: Option<ImageRenderInfo>,
}

/// Text as it appears on screen
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedText {
    /// Full text content
    pub content: String,
    /// Content after truncation to the node width
    pub displayed: String,
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Number of laid out lines
    pub lines: u32,
}

/// Pixel size of a decoded image bound to an image node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
}

/// One painted node with fully resolved geometry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
    pub kind: ElementTypeId,
    /// Depth below the root
    pub depth: usize,
    /// Absolute bounds including inherited translation
    pub bounds: Rect,
    /// Effective opacity after multiplying ancestors
    pub opacity: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    pub corner_radius: CornerRadius,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<RenderedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRenderInfo>,
    /// Set when decoded pixels were attached for the image source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<DecodedImage>,
}

/// Layout tree plus the render data of every element in it
pub struct RenderTree {
    layout_tree: LayoutTree,
    records: FxHashMap<LayoutNodeId, ElementRecord>,
    images: FxHashMap<String, ImageData>,
    root: LayoutNodeId,
}

impl RenderTree {
    /// Build a render tree from an element builder
    pub fn from_element(element: &dyn ElementBuilder) -> Result<Self> {
        let mut layout_tree = LayoutTree::new();
        let root = element.build(&mut layout_tree)?;
        let mut tree = Self {
            layout_tree,
            records: FxHashMap::default(),
            images: FxHashMap::default(),
            root,
        };
        tree.collect(element, root)?;
        Ok(tree)
    }

    /// Walk the element tree alongside the layout tree, which was built in
    /// the same child order
    fn collect(&mut self, element: &dyn ElementBuilder, node: LayoutNodeId) -> Result<()> {
        self.records.insert(
            node,
            ElementRecord {
                kind: element.element_type_id(),
                props: element.render_props(),
                text: element.text_render_info(),
                image: element.image_render_info(),
            },
        );

        let child_nodes = self.layout_tree.children(node);
        let child_builders = element.children_builders();
        if child_nodes.len() != child_builders.len() {
            return Err(LayoutError::Taffy(format!(
                "element has {} children but layout node has {}",
                child_builders.len(),
                child_nodes.len()
            )));
        }
        for (builder, child) in child_builders.iter().zip(child_nodes) {
            self.collect(builder.as_ref(), child)?;
        }
        Ok(())
    }

    pub fn root(&self) -> LayoutNodeId {
        self.root
    }

    pub fn layout(&self) -> &LayoutTree {
        &self.layout_tree
    }

    /// Bind decoded pixels to every image node showing `source`
    pub fn attach_image(&mut self, source: impl Into<String>, data: ImageData) {
        self.images.insert(source.into(), data);
    }

    /// Compute layout for a `width` x `height` viewport
    pub fn compute_layout(&mut self, width: f32, height: f32) -> Result<()> {
        self.layout_tree.compute_layout(self.root, width, height)
    }

    /// Flatten the tree in paint order
    pub fn nodes(&self) -> Vec<RenderNode> {
        let measurer = text_measurer();
        let mut out = Vec::with_capacity(self.records.len());
        self.flatten(self.root, (0.0, 0.0), 1.0, 0, measurer.as_ref(), &mut out);
        out
    }

    fn flatten(
        &self,
        node: LayoutNodeId,
        parent_origin: (f32, f32),
        parent_opacity: f32,
        depth: usize,
        measurer: &dyn TextMeasurer,
        out: &mut Vec<RenderNode>,
    ) {
        let (Some(bounds), Some(record)) = (
            self.layout_tree.get_bounds(node, parent_origin),
            self.records.get(&node),
        ) else {
            return;
        };

        let props = &record.props;
        let x = bounds.x + props.translate.x;
        let y = bounds.y + props.translate.y;
        let opacity = parent_opacity * props.opacity;

        let text = record.text.as_ref().map(|info| {
            let line_height = info.font_size * LINE_HEIGHT;
            let lines = if line_height > 0.0 {
                ((bounds.height / line_height).round() as u32).max(1)
            } else {
                1
            };
            let displayed =
                if info.overflow == TextOverflow::Ellipsis && info.max_lines == Some(1) {
                    truncate_to_width(&info.content, bounds.width, info.font_size, measurer)
                } else {
                    info.content.clone()
                };
            RenderedText {
                content: info.content.clone(),
                displayed,
                font_size: info.font_size,
                color: info.color,
                align: info.align,
                lines,
            }
        });

        out.push(RenderNode {
            kind: record.kind,
            depth,
            bounds: Rect::new(x, y, bounds.width, bounds.height),
            opacity,
            background: props.background,
            corner_radius: props.border_radius,
            shadow: props.shadow,
            text,
            image: record.image.clone(),
            decoded: record
                .image
                .as_ref()
                .and_then(|info| self.images.get(&info.source))
                .map(|data| DecodedImage {
                    width: data.width(),
                    height: data.height(),
                }),
        });

        for child in self.layout_tree.children(node) {
            self.flatten(child, (x, y), opacity, depth + 1, measurer, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_translation_and_opacity_are_inherited() {
        let ui = div().w(200.0).h(200.0).child(
            div()
                .w(100.0)
                .h(100.0)
                .translate_x(-300.0)
                .opacity(0.5)
                .child(div().w(10.0).h(10.0).opacity(0.5)),
        );
        let mut tree = RenderTree::from_element(&ui).unwrap();
        tree.compute_layout(200.0, 200.0).unwrap();
        let nodes = tree.nodes();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].bounds.x(), -300.0);
        assert_eq!(nodes[2].bounds.x(), -300.0);
        assert_eq!(nodes[2].opacity, 0.25);
        assert_eq!(nodes[2].depth, 2);
    }

    #[test]
    fn test_single_line_text_is_ellipsized() {
        let ui = div().flex_col().w(100.0).child(
            text("Jetpack Compose is the next thing for Android.")
                .size(14.0)
                .max_lines(1)
                .ellipsis(),
        );
        let mut tree = RenderTree::from_element(&ui).unwrap();
        tree.compute_layout(100.0, 100.0).unwrap();
        let nodes = tree.nodes();
        let text = nodes[1].text.as_ref().unwrap();

        assert_eq!(text.lines, 1);
        assert!(text.displayed.ends_with('\u{2026}'));
        assert!(text.displayed.chars().count() < text.content.chars().count());
    }

    #[test]
    fn test_fitting_text_is_unchanged() {
        let ui = div().flex_col().w(300.0).child(text("Make it Easy").size(16.0));
        let mut tree = RenderTree::from_element(&ui).unwrap();
        tree.compute_layout(300.0, 100.0).unwrap();
        let nodes = tree.nodes();
        let text = nodes[1].text.as_ref().unwrap();
        assert_eq!(text.displayed, "Make it Easy");
        assert_eq!(text.lines, 1);
    }

    #[test]
    fn test_image_node_carries_source() {
        let ui = div().bg(Color::WHITE).child(image("cat.png").size(65.0));
        let mut tree = RenderTree::from_element(&ui).unwrap();
        tree.compute_layout(100.0, 100.0).unwrap();
        let nodes = tree.nodes();
        assert_eq!(nodes[1].kind, ElementTypeId::Image);
        assert_eq!(nodes[1].image.as_ref().unwrap().source, "cat.png");
        assert_eq!(nodes[0].background, Some(Color::WHITE));
    }

    #[test]
    fn test_attached_image_reaches_image_nodes() {
        let ui = div()
            .flex_row()
            .child(image("cat.png").size(65.0).padding(4.0))
            .child(image("dog.png").size(65.0));
        let mut tree = RenderTree::from_element(&ui).unwrap();
        tree.attach_image("cat.png", ImageData::solid(57, 57, Color::WHITE));
        tree.compute_layout(200.0, 100.0).unwrap();
        let nodes = tree.nodes();

        assert_eq!(
            nodes[1].decoded,
            Some(DecodedImage {
                width: 57,
                height: 57
            })
        );
        assert_eq!(nodes[2].decoded, None);
        assert_eq!(nodes[0].decoded, None);
    }
}
