//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod settings;

// Re-export common types
pub use clipboard::{
    ClipboardError, Display, LiveClipboard, OwnerChangeHandler, SubscriptionId,
};
pub use config::ConfigStore;
pub use settings::Settings;
