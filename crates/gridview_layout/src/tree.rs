//! Layout tree management

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::element::ElementBounds;
use crate::error::{LayoutError, Result};
use crate::text_measure::{measure_text, LINE_HEIGHT};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Context stored with text nodes for measurement during layout
#[derive(Clone, Debug)]
pub struct TextMeasureContext {
    /// The text content to measure
    pub content: String,
    /// Font size in pixels
    pub font_size: f32,
    /// Maximum number of lines, `None` for unlimited wrapping
    pub max_lines: Option<u32>,
}

/// Measure function for text nodes during Taffy layout
///
/// Single-line text never grows wider than the available width; the
/// renderer ellipsizes whatever does not fit. Wrapping text is estimated
/// by dividing its single-line width over the available width.
fn text_measure_function(
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    _node_id: NodeId,
    node_context: Option<&mut TextMeasureContext>,
    _style: &Style,
) -> Size<f32> {
    if let Size {
        width: Some(width),
        height: Some(height),
    } = known_dimensions
    {
        return Size { width, height };
    }

    let Some(ctx) = node_context else {
        return Size::ZERO;
    };

    let metrics = measure_text(&ctx.content, ctx.font_size);
    let line_height = ctx.font_size * LINE_HEIGHT;

    let max_width = known_dimensions.width.or(match available_space.width {
        AvailableSpace::Definite(w) => Some(w),
        AvailableSpace::MaxContent => None,
        AvailableSpace::MinContent => Some(0.0),
    });

    let (width, lines) = match max_width {
        Some(max) if metrics.width > max => {
            let lines = if max > 0.0 {
                (metrics.width / max).ceil() as u32
            } else {
                1
            };
            let lines = match ctx.max_lines {
                Some(limit) => lines.min(limit.max(1)),
                None => lines,
            };
            (max, lines)
        }
        _ => (metrics.width, 1),
    };

    Size {
        width: known_dimensions.width.unwrap_or(width),
        height: known_dimensions
            .height
            .unwrap_or(line_height * lines as f32),
    }
}

/// Maps between Gridview node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree<TextMeasureContext>,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    reverse_map: FxHashMap<NodeId, LayoutNodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
            reverse_map: FxHashMap::default(),
        }
    }

    fn insert(&mut self, taffy_node: NodeId) -> LayoutNodeId {
        let id = self.node_map.insert(taffy_node);
        self.reverse_map.insert(taffy_node, id);
        id
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode)
    }

    /// Create a new layout node
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        Ok(self.insert(taffy_node))
    }

    /// Create a text node that is measured during layout
    pub fn create_text_node(
        &mut self,
        style: Style,
        context: TextMeasureContext,
    ) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf_with_context(style, context)?;
        Ok(self.insert(taffy_node))
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    /// Compute layout for the tree rooted at `root` within a definite viewport
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32, height: f32) -> Result<()> {
        let taffy_node = self.taffy_node(root)?;
        let available = Size {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        };
        self.taffy
            .compute_layout_with_measure(taffy_node, available, text_measure_function)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Get children of a layout node
    pub fn children(&self, parent: LayoutNodeId) -> Vec<LayoutNodeId> {
        let Some(&taffy_node) = self.node_map.get(parent) else {
            return Vec::new();
        };
        let Ok(children) = self.taffy.children(taffy_node) else {
            return Vec::new();
        };
        children
            .iter()
            .filter_map(|child| self.reverse_map.get(child).copied())
            .collect()
    }

    /// Get computed layout as ElementBounds with parent offset
    pub fn get_bounds(&self, id: LayoutNodeId, parent_offset: (f32, f32)) -> Option<ElementBounds> {
        self.get_layout(id)
            .map(|layout| ElementBounds::from_layout(layout, parent_offset))
    }

    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_ctx(content: &str, font_size: f32, max_lines: Option<u32>) -> TextMeasureContext {
        TextMeasureContext {
            content: content.to_string(),
            font_size,
            max_lines,
        }
    }

    #[test]
    fn test_row_of_equal_columns() {
        let mut tree = LayoutTree::new();
        let row = tree
            .create_node(Style {
                display: Display::Flex,
                size: Size {
                    width: length(360.0),
                    height: length(100.0),
                },
                ..Default::default()
            })
            .unwrap();
        let cell = Style {
            flex_grow: 1.0,
            flex_shrink: 1.0,
            flex_basis: length(0.0),
            ..Default::default()
        };
        let a = tree.create_node(cell.clone()).unwrap();
        let b = tree.create_node(cell).unwrap();
        tree.add_child(row, a).unwrap();
        tree.add_child(row, b).unwrap();
        tree.compute_layout(row, 360.0, 640.0).unwrap();

        let left = tree.get_bounds(a, (0.0, 0.0)).unwrap();
        let right = tree.get_bounds(b, (0.0, 0.0)).unwrap();
        assert_eq!(left.width, 180.0);
        assert_eq!(right.x, 180.0);
        assert_eq!(tree.children(row), vec![a, b]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_single_line_text_is_capped_to_available_width() {
        let mut tree = LayoutTree::new();
        let col = tree
            .create_node(Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: Some(AlignItems::Center),
                size: Size {
                    width: length(100.0),
                    height: auto(),
                },
                ..Default::default()
            })
            .unwrap();
        let long = "a very long line of text that cannot fit";
        let node = tree
            .create_text_node(Style::default(), text_ctx(long, 10.0, Some(1)))
            .unwrap();
        tree.add_child(col, node).unwrap();
        tree.compute_layout(col, 100.0, 500.0).unwrap();

        let bounds = tree.get_bounds(node, (0.0, 0.0)).unwrap();
        assert!(bounds.width <= 100.0);
        assert!((bounds.height - 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrapping_text_grows_taller() {
        let mut tree = LayoutTree::new();
        let col = tree
            .create_node(Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                size: Size {
                    width: length(100.0),
                    height: auto(),
                },
                ..Default::default()
            })
            .unwrap();
        // 40 chars at 10px => 220px => 3 lines in 100px
        let node = tree
            .create_text_node(Style::default(), text_ctx(&"x".repeat(40), 10.0, None))
            .unwrap();
        tree.add_child(col, node).unwrap();
        tree.compute_layout(col, 100.0, 500.0).unwrap();

        let bounds = tree.get_bounds(node, (0.0, 0.0)).unwrap();
        assert!((bounds.height - 36.0).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut tree = LayoutTree::new();
        let node = tree.create_node(Style::default()).unwrap();

        let mut empty = LayoutTree::new();
        assert!(empty.get_layout(node).is_none());
        assert!(empty.children(node).is_empty());
        assert!(matches!(
            empty.compute_layout(node, 1.0, 1.0),
            Err(LayoutError::UnknownNode)
        ));
    }
}
