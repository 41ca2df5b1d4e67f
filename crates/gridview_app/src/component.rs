//! Components
//!
//! A component turns its current state into an element tree. Rendering is
//! cheap and side-effect free; the host re-renders on every frame it needs.

use gridview_layout::Div;

/// Something that renders to an element tree
pub trait Component {
    fn render(&self) -> Div;
}
