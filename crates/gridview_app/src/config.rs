//! Grid configuration
//!
//! Every value has a default matching the stock screen, so an empty TOML
//! file is a valid configuration:
//!
//! ```toml
//! item_count = 30
//! columns = 2
//! initial_offset_x = -300.0
//! slide_duration_ms = 300
//! fade_duration_ms = 600
//! viewport_width = 360.0
//! viewport_height = 640.0
//! frame_interval_ms = 16.0
//! beyond_bounds_rows = 0
//! # row_height = 180.0      # measured from the card when omitted
//! # asset_dir = "assets"
//! ```

use std::path::{Path, PathBuf};

use gridview_animation::{tween, Easing};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::item::EntranceSpec;

/// Configuration for the animated grid screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of grid items
    pub item_count: usize,
    /// Number of fixed columns
    pub columns: usize,
    /// Horizontal offset items start from before sliding in
    pub initial_offset_x: f32,
    pub slide_duration_ms: u32,
    pub fade_duration_ms: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Fixed row height; measured from the item card when `None`
    pub row_height: Option<f32>,
    /// Virtual time between host frames
    pub frame_interval_ms: f32,
    /// Extra rows kept composed above and below the viewport
    pub beyond_bounds_rows: usize,
    /// Directory holding image assets; images are not decoded when `None`
    pub asset_dir: Option<PathBuf>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            item_count: 30,
            columns: 2,
            initial_offset_x: -300.0,
            slide_duration_ms: 300,
            fade_duration_ms: 600,
            viewport_width: 360.0,
            viewport_height: 640.0,
            row_height: None,
            frame_interval_ms: 16.0,
            beyond_bounds_rows: 0,
            asset_dir: None,
        }
    }
}

impl GridConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("loaded grid config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(AppError::Config("columns must be at least 1".into()));
        }
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(AppError::Config(format!(
                "frame_interval_ms must be positive, got {}",
                self.frame_interval_ms
            )));
        }
        if let Some(height) = self.row_height {
            if !(height.is_finite() && height > 0.0) {
                return Err(AppError::Config(format!(
                    "row_height must be positive, got {height}"
                )));
            }
        }
        for (name, value) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AppError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.initial_offset_x.is_finite() {
            return Err(AppError::Config("initial_offset_x must be finite".into()));
        }
        Ok(())
    }

    /// Entrance timing derived from this config
    pub fn entrance_spec(&self) -> EntranceSpec {
        EntranceSpec {
            initial_offset_x: self.initial_offset_x,
            slide: tween(self.slide_duration_ms, Easing::Linear),
            fade: tween(self.fade_duration_ms, Easing::FastOutSlowIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = GridConfig::from_toml_str("").unwrap();
        assert_eq!(config, GridConfig::default());
        assert_eq!(config.item_count, 30);
        assert_eq!(config.columns, 2);
    }

    #[test]
    fn test_partial_toml() {
        let config = GridConfig::from_toml_str("columns = 3\nrow_height = 120.0\n").unwrap();
        assert_eq!(config.columns, 3);
        assert_eq!(config.row_height, Some(120.0));
        assert_eq!(config.slide_duration_ms, 300);
    }

    #[test]
    fn test_zero_columns_rejected() {
        let err = GridConfig::from_toml_str("columns = 0").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_bad_frame_interval_rejected() {
        let config = GridConfig {
            frame_interval_ms: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unparseable_toml() {
        let err = GridConfig::from_toml_str("columns = \"two\"").unwrap_err();
        assert!(matches!(err, AppError::Toml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GridConfig::load("/nonexistent/gridview.toml").unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("gridview-config-{}.toml", std::process::id()));
        std::fs::write(&path, "item_count = 10\n").unwrap();
        let config = GridConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.item_count, 10);
    }

    #[test]
    fn test_entrance_spec() {
        let spec = GridConfig::default().entrance_spec();
        assert_eq!(spec.initial_offset_x, -300.0);
        assert_eq!(spec.slide.duration_ms, 300.0);
        assert_eq!(spec.slide.easing, Easing::Linear);
        assert_eq!(spec.fade.duration_ms, 600.0);
        assert_eq!(spec.fade.easing, Easing::FastOutSlowIn);
    }
}
