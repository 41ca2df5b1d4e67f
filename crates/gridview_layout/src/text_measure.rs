//! Text measurement for layout
//!
//! Layout asks a [`TextMeasurer`] for the size of each text node. Hosts with
//! a real font stack install one with [`set_text_measurer`]; otherwise an
//! estimate based on font size is used, which keeps headless layout
//! deterministic.

use std::sync::{Arc, RwLock};

/// Text measurement result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Distance from baseline to top
    pub ascender: f32,
    /// Distance from baseline to bottom, typically negative
    pub descender: f32,
}

/// Trait for measuring single-line text
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` laid out on a single line at `font_size`
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics;
}

/// Line height multiplier applied to font size
pub const LINE_HEIGHT: f32 = 1.2;

/// Estimating measurer used when no font stack is installed
///
/// Every character is assumed to be `0.55 * font_size` wide, which is close
/// to the average advance of common proportional fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> TextMetrics {
        let char_count = text.chars().count() as f32;
        TextMetrics {
            width: char_count * font_size * 0.55,
            height: font_size * LINE_HEIGHT,
            ascender: font_size * 0.8,
            descender: font_size * -0.2,
        }
    }
}

static TEXT_MEASURER: RwLock<Option<Arc<dyn TextMeasurer>>> = RwLock::new(None);

/// Set the global text measurer
pub fn set_text_measurer(measurer: Arc<dyn TextMeasurer>) {
    let mut guard = TEXT_MEASURER.write().unwrap_or_else(|e| e.into_inner());
    *guard = Some(measurer);
}

/// Clear the global text measurer, reverting to estimation
pub fn clear_text_measurer() {
    let mut guard = TEXT_MEASURER.write().unwrap_or_else(|e| e.into_inner());
    *guard = None;
}

/// The installed global measurer, or the estimating fallback
pub fn text_measurer() -> Arc<dyn TextMeasurer> {
    let guard = TEXT_MEASURER.read().unwrap_or_else(|e| e.into_inner());
    match guard.as_ref() {
        Some(measurer) => Arc::clone(measurer),
        None => Arc::new(EstimatedTextMeasurer),
    }
}

/// Measure text using the global measurer, or fall back to estimation
pub fn measure_text(text: &str, font_size: f32) -> TextMetrics {
    let guard = TEXT_MEASURER.read().unwrap_or_else(|e| e.into_inner());
    match guard.as_ref() {
        Some(measurer) => measurer.measure(text, font_size),
        None => EstimatedTextMeasurer.measure(text, font_size),
    }
}

/// Ellipsis appended to truncated text
pub const ELLIPSIS: &str = "\u{2026}";

/// Truncate `text` so it fits in `max_width`, appending an ellipsis
///
/// Text that already fits is returned unchanged. If not even the ellipsis
/// fits, the result is the bare ellipsis.
pub fn truncate_to_width(
    text: &str,
    max_width: f32,
    font_size: f32,
    measurer: &dyn TextMeasurer,
) -> String {
    if measurer.measure(text, font_size).width <= max_width {
        return text.to_string();
    }

    // Binary search on the number of kept characters
    let chars: Vec<char> = text.chars().collect();
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate: String = chars[..mid].iter().collect::<String>() + ELLIPSIS;
        if measurer.measure(&candidate, font_size).width <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    let kept: String = chars[..lo].iter().collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}
