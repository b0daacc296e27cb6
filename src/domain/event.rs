//! Selection owner change events

use std::fmt;

use super::selection::SelectionTarget;

/// Why the selection owner changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OwnerChangeReason {
    /// Some client became the new owner
    #[default]
    NewOwner,
    /// The owning window was destroyed
    Destroy,
    /// The owning client disconnected
    Close,
}

impl OwnerChangeReason {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewOwner => "new-owner",
            Self::Destroy => "destroy",
            Self::Close => "close",
        }
    }
}

impl fmt::Display for OwnerChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw owner change notification, relayed untouched to tracker listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerChangeEvent {
    pub selection: SelectionTarget,
    pub reason: OwnerChangeReason,
    /// Milliseconds since the Unix epoch when the platform reported the change
    pub timestamp_ms: u64,
}

impl OwnerChangeEvent {
    pub fn new(selection: SelectionTarget, reason: OwnerChangeReason) -> Self {
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self {
            selection,
            reason,
            timestamp_ms,
        }
    }
}
