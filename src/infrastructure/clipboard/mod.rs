//! Clipboard infrastructure module
//!
//! Provides the system clipboard through clipboard-rs and an in-process
//! selection server for headless use.

mod memory;
mod system;

pub use memory::{MemoryClipboard, MemoryDisplay};
pub use system::{SystemClipboard, SystemDisplay};
