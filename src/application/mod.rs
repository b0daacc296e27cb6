//! Application layer - Use cases and port interfaces
//!
//! Contains the selection tracker, the watch use case built on it,
//! and trait definitions for the platform and configuration.

pub(crate) mod listeners;
pub mod ports;
pub mod tracker;
pub mod watch;

// Re-export use cases
pub use tracker::{ClipboardTracker, ListenerId, TrackerError};
pub use watch::{SelectionChange, SelectionWatch};
