//! Tracker configuration value object

use serde::{Deserialize, Serialize};

/// Shortest text accepted as a history item, in bytes
pub const DEFAULT_MIN_TEXT_ITEM_SIZE: u32 = 1;
/// Longest text accepted as a history item, in bytes
pub const DEFAULT_MAX_TEXT_ITEM_SIZE: u32 = u32::MAX;

/// Tracker configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub trim_items: Option<bool>,
    pub min_text_item_size: Option<u32>,
    pub max_text_item_size: Option<u32>,
    pub track_primary: Option<bool>,
}

impl TrackerConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            trim_items: Some(false),
            min_text_item_size: Some(DEFAULT_MIN_TEXT_ITEM_SIZE),
            max_text_item_size: Some(DEFAULT_MAX_TEXT_ITEM_SIZE),
            track_primary: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            trim_items: other.trim_items.or(self.trim_items),
            min_text_item_size: other.min_text_item_size.or(self.min_text_item_size),
            max_text_item_size: other.max_text_item_size.or(self.max_text_item_size),
            track_primary: other.track_primary.or(self.track_primary),
        }
    }

    pub fn trim_items_or_default(&self) -> bool {
        self.trim_items.unwrap_or(false)
    }

    pub fn min_text_item_size_or_default(&self) -> u32 {
        self.min_text_item_size
            .unwrap_or(DEFAULT_MIN_TEXT_ITEM_SIZE)
    }

    pub fn max_text_item_size_or_default(&self) -> u32 {
        self.max_text_item_size
            .unwrap_or(DEFAULT_MAX_TEXT_ITEM_SIZE)
    }

    pub fn track_primary_or_default(&self) -> bool {
        self.track_primary.unwrap_or(false)
    }
}
