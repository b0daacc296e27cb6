//! Clipboard port interfaces
//!
//! The platform side of selection tracking: a display that can notify about
//! owner changes, and live selections that can be read, written and owned.

use thiserror::Error;

use crate::domain::event::OwnerChangeEvent;
use crate::domain::item::PixelBuffer;
use crate::domain::offer::OfferedContent;
use crate::domain::selection::SelectionTarget;
use crate::domain::target::TargetFormat;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Selection '{0}' is not supported on this platform")]
    UnsupportedSelection(SelectionTarget),

    #[error("Failed to read from clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write to clipboard: {0}")]
    WriteFailed(String),
}

/// Callback invoked for every owner change of a live selection
pub type OwnerChangeHandler = Box<dyn FnMut(&OwnerChangeEvent)>;

/// Handle of an owner-change subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Port for one live selection.
///
/// Reads block until the current owner answered. `Ok(None)` means the
/// selection holds nothing in the requested family.
pub trait LiveClipboard {
    /// Fetch the current content as text
    fn wait_for_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Fetch the current content as an image
    fn wait_for_image(&self) -> Result<Option<PixelBuffer>, ClipboardError>;

    /// Become owner with `text` as the sole content
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Become owner with `image` as the sole content
    fn set_image(&self, image: &PixelBuffer) -> Result<(), ClipboardError>;

    /// Become owner advertising `targets`, serving requests lazily from `offer`.
    ///
    /// The offer lives in the platform's ownership slot until another client
    /// takes the selection, at which point it is released.
    fn set_with_owner(
        &self,
        targets: &[TargetFormat],
        offer: OfferedContent,
    ) -> Result<(), ClipboardError>;

    /// Ask the clipboard manager to keep the current content after we exit
    fn store(&self) -> Result<(), ClipboardError>;

    /// Subscribe to owner changes
    fn connect_owner_change(&self, handler: OwnerChangeHandler) -> SubscriptionId;

    /// Drop a subscription made with `connect_owner_change`
    fn disconnect_owner_change(&self, id: SubscriptionId);
}

/// Port for the display connection
pub trait Display {
    type Clipboard: LiveClipboard;

    /// Ask the display server to report owner changes of `target`.
    ///
    /// Returns false when the server lacks the extension for it.
    fn request_selection_notification(&self, target: SelectionTarget) -> bool;

    /// Get the live selection for `target`
    fn clipboard(&self, target: SelectionTarget) -> Result<Self::Clipboard, ClipboardError>;
}
