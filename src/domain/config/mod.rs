//! Configuration value objects

mod tracker_config;

pub use tracker_config::{TrackerConfig, DEFAULT_MAX_TEXT_ITEM_SIZE, DEFAULT_MIN_TEXT_ITEM_SIZE};
