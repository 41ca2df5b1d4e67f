//! Vertical scroll position
//!
//! Scrolling is clamped at both edges. There is no momentum or overscroll:
//! each host scroll event moves the offset directly.

/// Clamped vertical scroll offset over a content/viewport pair
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    offset: f32,
    viewport_height: f32,
    content_height: f32,
}

impl ScrollState {
    pub fn new(viewport_height: f32, content_height: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_height: viewport_height.max(0.0),
            content_height: content_height.max(0.0),
        }
    }

    /// Current offset from the top of the content
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Largest valid offset; zero when the content fits
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scroll by `delta_y` (positive moves content up), returning the applied delta
    pub fn scroll_by(&mut self, delta_y: f32) -> f32 {
        let before = self.offset;
        self.scroll_to(self.offset + delta_y);
        self.offset - before
    }

    /// Jump to an absolute offset, clamped to the valid range
    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            self.offset
        };
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.scroll_to(self.offset);
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.scroll_to(self.offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut scroll = ScrollState::new(600.0, 1000.0);
        assert_eq!(scroll.scroll_by(250.0), 250.0);
        assert_eq!(scroll.scroll_by(500.0), 150.0);
        assert_eq!(scroll.offset(), 400.0);
        assert_eq!(scroll.scroll_by(-1000.0), -400.0);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_content_smaller_than_viewport() {
        let mut scroll = ScrollState::new(600.0, 100.0);
        scroll.scroll_by(50.0);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.max_offset(), 0.0);
    }

    #[test]
    fn test_resize_reclamps() {
        let mut scroll = ScrollState::new(600.0, 1000.0);
        scroll.scroll_to(400.0);
        scroll.set_viewport_height(800.0);
        assert_eq!(scroll.offset(), 200.0);
    }

    #[test]
    fn test_non_finite_offset_is_ignored() {
        let mut scroll = ScrollState::new(100.0, 1000.0);
        scroll.scroll_to(50.0);
        scroll.scroll_by(f32::NAN);
        assert_eq!(scroll.offset(), 50.0);
    }
}
