//! In-process selection server
//!
//! Keeps selections in memory and behaves like a display server: writes make
//! the writer the owner, owners serve requests lazily, ownership loss releases
//! the offered item, and owner changes are queued until the event loop
//! dispatches them. Used headless and by the test suite to play "other
//! applications".

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::trace;

use crate::application::listeners::ListenerList;
use crate::application::ports::{
    ClipboardError, Display, LiveClipboard, OwnerChangeHandler, SubscriptionId,
};
use crate::domain::event::{OwnerChangeEvent, OwnerChangeReason};
use crate::domain::item::PixelBuffer;
use crate::domain::offer::{OfferedContent, SelectionData};
use crate::domain::selection::SelectionTarget;
use crate::domain::target::{image_targets, text_targets, TargetFormat};

#[derive(Debug, Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Image(PixelBuffer),
    Offer {
        targets: Vec<TargetFormat>,
        offer: OfferedContent,
    },
}

#[derive(Default)]
struct SelectionState {
    content: Content,
    pending: VecDeque<OwnerChangeEvent>,
    refuse_writes: bool,
    writes: usize,
    stores: usize,
    released: usize,
}

impl SelectionState {
    fn replace(&mut self, selection: SelectionTarget, content: Content, reason: OwnerChangeReason) {
        let previous = std::mem::replace(&mut self.content, content);
        if let Content::Offer { offer, .. } = previous {
            offer.release();
            self.released += 1;
        }
        self.pending.push_back(OwnerChangeEvent::new(selection, reason));
    }
}

/// Handle on one in-memory selection.
///
/// Clones share the same selection, so tests can hold one while a tracker
/// owns another.
#[derive(Clone)]
pub struct MemoryClipboard {
    target: SelectionTarget,
    state: Rc<RefCell<SelectionState>>,
    handlers: Rc<RefCell<ListenerList>>,
}

impl MemoryClipboard {
    /// The selection this handle points to
    pub fn target(&self) -> SelectionTarget {
        self.target
    }

    /// Another application copies text
    pub fn copy_text_from_other_app(&self, text: &str) {
        self.state.borrow_mut().replace(
            self.target,
            Content::Text(text.to_string()),
            OwnerChangeReason::NewOwner,
        );
    }

    /// Another application copies an image
    pub fn copy_image_from_other_app(&self, image: PixelBuffer) {
        self.state
            .borrow_mut()
            .replace(self.target, Content::Image(image), OwnerChangeReason::NewOwner);
    }

    /// The owner goes away without handing the content over
    pub fn clear(&self, reason: OwnerChangeReason) {
        self.state
            .borrow_mut()
            .replace(self.target, Content::Empty, reason);
    }

    /// Another application asks for the content in `format`
    pub fn request(&self, format: &TargetFormat) -> Option<SelectionData> {
        match &self.state.borrow().content {
            Content::Empty => None,
            Content::Text(text) => format.is_text().then(|| SelectionData::Text(text.clone())),
            Content::Image(image) => format.is_image().then(|| SelectionData::Image(image.clone())),
            Content::Offer { targets, offer } => {
                if targets.contains(format) {
                    offer.serve(format)
                } else {
                    None
                }
            }
        }
    }

    /// Targets the current owner advertises
    pub fn advertised_targets(&self) -> Vec<TargetFormat> {
        match &self.state.borrow().content {
            Content::Empty => Vec::new(),
            Content::Text(_) => text_targets(),
            Content::Image(_) => image_targets(),
            Content::Offer { targets, .. } => targets.clone(),
        }
    }

    /// Whether an item is currently offered through `set_with_owner`
    pub fn has_offer(&self) -> bool {
        matches!(self.state.borrow().content, Content::Offer { .. })
    }

    /// Make writes through the port fail, like a selection whose ownership
    /// cannot be taken
    pub fn refuse_writes(&self, refuse: bool) {
        self.state.borrow_mut().refuse_writes = refuse;
    }

    /// Number of writes made through the port
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    /// Number of store requests
    pub fn store_count(&self) -> usize {
        self.state.borrow().stores
    }

    /// Number of offered items released after ownership loss
    pub fn released_count(&self) -> usize {
        self.state.borrow().released
    }

    /// Number of live owner-change subscriptions
    pub fn subscription_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Number of queued owner changes
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Deliver queued owner changes to subscribers. Returns how many were delivered.
    pub fn dispatch_pending(&self) -> usize {
        let mut delivered = 0;
        loop {
            let Some(event) = self.state.borrow_mut().pending.pop_front() else {
                break;
            };

            trace!(selection = %self.target, reason = %event.reason, "Dispatching owner change");
            ListenerList::emit(&self.handlers, &event);
            delivered += 1;
        }
        delivered
    }

    fn write(&self, content: Content) -> Result<(), ClipboardError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_writes {
            return Err(ClipboardError::WriteFailed(format!(
                "{} selection refused ownership",
                self.target
            )));
        }
        state.writes += 1;
        state.replace(self.target, content, OwnerChangeReason::NewOwner);
        Ok(())
    }
}

impl LiveClipboard for MemoryClipboard {
    fn wait_for_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(match self.request(&TargetFormat::utf8_text()) {
            Some(SelectionData::Text(text)) => Some(text),
            _ => None,
        })
    }

    fn wait_for_image(&self) -> Result<Option<PixelBuffer>, ClipboardError> {
        Ok(match self.request(&TargetFormat::png()) {
            Some(SelectionData::Image(image)) => Some(image),
            _ => None,
        })
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.write(Content::Text(text.to_string()))
    }

    fn set_image(&self, image: &PixelBuffer) -> Result<(), ClipboardError> {
        self.write(Content::Image(image.clone()))
    }

    fn set_with_owner(
        &self,
        targets: &[TargetFormat],
        offer: OfferedContent,
    ) -> Result<(), ClipboardError> {
        self.write(Content::Offer {
            targets: targets.to_vec(),
            offer,
        })
    }

    fn store(&self) -> Result<(), ClipboardError> {
        self.state.borrow_mut().stores += 1;
        Ok(())
    }

    fn connect_owner_change(&self, handler: OwnerChangeHandler) -> SubscriptionId {
        SubscriptionId(self.handlers.borrow_mut().add(handler))
    }

    fn disconnect_owner_change(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().remove(id.0);
    }
}

/// In-process display holding every selection
pub struct MemoryDisplay {
    selections: RefCell<HashMap<SelectionTarget, MemoryClipboard>>,
    notifications: bool,
}

impl MemoryDisplay {
    /// Create a display that supports owner-change notifications
    pub fn new() -> Self {
        Self {
            selections: RefCell::new(HashMap::new()),
            notifications: true,
        }
    }

    /// Create a display lacking owner-change notifications
    pub fn without_notifications() -> Self {
        Self {
            notifications: false,
            ..Self::new()
        }
    }

    /// Shared handle on `target`
    pub fn selection(&self, target: SelectionTarget) -> MemoryClipboard {
        self.selections
            .borrow_mut()
            .entry(target)
            .or_insert_with(|| MemoryClipboard {
                target,
                state: Rc::new(RefCell::new(SelectionState::default())),
                handlers: Rc::new(RefCell::new(ListenerList::default())),
            })
            .clone()
    }

    /// Deliver queued owner changes on every selection
    pub fn dispatch_pending(&self) -> usize {
        let selections: Vec<MemoryClipboard> = self.selections.borrow().values().cloned().collect();
        selections.iter().map(MemoryClipboard::dispatch_pending).sum()
    }
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MemoryDisplay {
    type Clipboard = MemoryClipboard;

    fn request_selection_notification(&self, _target: SelectionTarget) -> bool {
        self.notifications
    }

    fn clipboard(&self, target: SelectionTarget) -> Result<MemoryClipboard, ClipboardError> {
        Ok(self.selection(target))
    }
}
