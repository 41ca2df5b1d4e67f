//! Static item content
//!
//! Every grid item shows the same image, heading and subtitle.

/// Content shared by all grid items
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaticItemContent {
    pub image: &'static str,
    pub heading: &'static str,
    pub subtitle: &'static str,
}

impl StaticItemContent {
    pub const IMAGE: &'static str = "cat.png";
    pub const HEADING: &'static str = "Make it Easy";
    pub const SUBTITLE: &'static str = "Jetpack Compose is the next thing for Android.";

    pub const fn new() -> Self {
        Self {
            image: Self::IMAGE,
            heading: Self::HEADING,
            subtitle: Self::SUBTITLE,
        }
    }
}

impl Default for StaticItemContent {
    fn default() -> Self {
        Self::new()
    }
}
