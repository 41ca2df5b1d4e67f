//! Frame snapshots
//!
//! A serializable view of the host at one instant, used by the CLI and by
//! tests to compare runs.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::item::EntrancePhase;

/// State of one mounted item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub index: usize,
    pub offset_x: f32,
    pub opacity: f32,
    pub phase: EntrancePhase,
}

/// State of the whole screen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Virtual time in milliseconds
    pub time_ms: f64,
    pub frame: u64,
    pub scroll_offset: f32,
    pub suspended: bool,
    /// Mounted items in index order
    pub items: Vec<ItemSnapshot>,
}

impl FrameSnapshot {
    pub fn item(&self, index: usize) -> Option<&ItemSnapshot> {
        self.items.iter().find(|item| item.index == index)
    }

    /// Check if every mounted item has finished its entrance
    pub fn all_settled(&self) -> bool {
        self.items
            .iter()
            .all(|item| item.phase == EntrancePhase::Settled)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
