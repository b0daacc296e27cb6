//! Domain layer - Core types
//!
//! Contains selections, targets, history items, events, configuration
//! and domain errors. This layer has no dependencies on external systems.

pub mod checksum;
pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod offer;
pub mod selection;
pub mod target;

// Re-export common types
pub use config::TrackerConfig;
pub use error::*;
pub use event::{OwnerChangeEvent, OwnerChangeReason};
pub use item::{ImageItem, Item, ItemKind, PixelBuffer, TextItem, UrisItem};
pub use offer::{OfferedContent, SelectionData};
pub use selection::SelectionTarget;
pub use target::TargetFormat;
