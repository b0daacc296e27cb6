//! Selection tracker use case
//!
//! One tracker follows one selection. It keeps a cache of what the selection
//! currently holds, decides whether fresh content is a real change, pushes
//! history items back onto the selection and relays owner changes to its
//! listeners.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::event::OwnerChangeEvent;
use crate::domain::item::{Item, PixelBuffer, UrisItem};
use crate::domain::offer::OfferedContent;
use crate::domain::selection::SelectionTarget;
use crate::domain::target::uris_offer_targets;

use super::listeners::ListenerList;
use super::ports::{ClipboardError, Display, LiveClipboard, Settings, SubscriptionId};

/// Errors from the tracker
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Clipboard notifications not supported for the {0} selection, clipboard tracking won't work")]
    NotificationsUnsupported(SelectionTarget),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Handle of a listener registered with [`ClipboardTracker::connect_owner_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Strip ASCII whitespace from both ends, matching what toolkits consider blank.
fn strip(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'))
}

/// Tracks one selection
pub struct ClipboardTracker<C, S>
where
    C: LiveClipboard,
    S: Settings,
{
    target: SelectionTarget,
    real: C,
    settings: Rc<S>,
    text: Option<String>,
    image_checksum: Option<String>,
    subscription: Option<SubscriptionId>,
    listeners: Rc<RefCell<ListenerList>>,
}

impl<C, S> ClipboardTracker<C, S>
where
    C: LiveClipboard,
    S: Settings,
{
    /// Start tracking `target`.
    ///
    /// Fails with [`TrackerError::NotificationsUnsupported`] when the display
    /// cannot report owner changes; callers treat that as fatal.
    pub fn new<D>(target: SelectionTarget, display: &D, settings: Rc<S>) -> Result<Self, TrackerError>
    where
        D: Display<Clipboard = C>,
    {
        if !display.request_selection_notification(target) {
            return Err(TrackerError::NotificationsUnsupported(target));
        }

        let real = display.clipboard(target)?;
        let listeners = Rc::new(RefCell::new(ListenerList::default()));
        let relay = Rc::clone(&listeners);
        let subscription = real.connect_owner_change(Box::new(move |event: &OwnerChangeEvent| {
            ListenerList::emit(&relay, event);
        }));

        debug!(selection = %target, "Tracking selection");

        Ok(Self {
            target,
            real,
            settings,
            text: None,
            image_checksum: None,
            subscription: Some(subscription),
            listeners,
        })
    }

    /// The selection this tracker follows
    pub fn target(&self) -> SelectionTarget {
        self.target
    }

    /// The live selection
    pub fn real(&self) -> &C {
        &self.real
    }

    /// Last text known to be held by the selection
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Checksum of the last image known to be held by the selection
    pub fn image_checksum(&self) -> Option<&str> {
        self.image_checksum.as_deref()
    }

    fn cache_text(&mut self, text: String) {
        self.text = Some(text);
        self.image_checksum = None;
    }

    fn cache_image_checksum(&mut self, checksum: String) {
        self.text = None;
        self.image_checksum = Some(checksum);
    }

    /// Pull text from the live selection.
    ///
    /// Returns the newly cached text, or `None` when the selection holds no
    /// text, the text is blank, its length is out of the configured bounds, or
    /// it equals what is already cached. With trimming enabled, padded text on
    /// the clipboard selection is replaced by its trimmed form.
    pub fn set_text(&mut self) -> Result<Option<&str>, TrackerError> {
        let text = match self.real.wait_for_text() {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(selection = %self.target, error = %e, "Failed to read text");
                return Ok(None);
            }
        };

        let stripped = strip(&text);
        let trim_items = self.settings.trim_items();
        let candidate = if trim_items { stripped } else { text.as_str() };
        let length = candidate.len();

        if length < self.settings.min_text_item_size()
            || length > self.settings.max_text_item_size()
            || stripped.is_empty()
        {
            debug!(selection = %self.target, length, "Ignoring text outside accepted bounds");
            return Ok(None);
        }

        if self.text.as_deref() == Some(candidate) {
            debug!(selection = %self.target, "Text unchanged");
            return Ok(None);
        }

        if trim_items && self.target.allows_normalization() && text != stripped {
            let stripped = stripped.to_string();
            self.select_text(&stripped)?;
        } else {
            let candidate = candidate.to_string();
            self.cache_text(candidate);
        }

        info!(selection = %self.target, length, "New text");
        Ok(self.text.as_deref())
    }

    /// Put `text` on the live selection and ask the clipboard manager to keep it.
    pub fn select_text(&mut self, text: &str) -> Result<(), TrackerError> {
        self.real.set_text(text)?;
        self.cache_text(text.to_string());
        self.real.store()?;
        Ok(())
    }

    fn select_uris(&mut self, item: &UrisItem) -> Result<(), TrackerError> {
        debug_assert!(!item.uris().is_empty(), "uris item without uris");
        let targets = uris_offer_targets();
        let offer = OfferedContent::new(Item::Uris(item.clone()));
        self.real.set_with_owner(&targets, offer)?;
        self.cache_text(item.value().to_string());
        self.real.store()?;

        debug!(selection = %self.target, uris = item.uris().len(), "Offering uris");
        Ok(())
    }

    fn select_image(&mut self, image: &PixelBuffer, checksum: String) -> Result<(), TrackerError> {
        self.real.set_image(image)?;
        self.cache_image_checksum(checksum);
        self.real.store()?;
        Ok(())
    }

    /// Pull an image from the live selection.
    ///
    /// Returns the image when its pixel checksum differs from the cached one,
    /// after taking ownership of it so it outlives the source application.
    pub fn set_image(&mut self) -> Result<Option<PixelBuffer>, TrackerError> {
        let image = match self.real.wait_for_image() {
            Ok(Some(image)) => image,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(selection = %self.target, error = %e, "Failed to read image");
                return Ok(None);
            }
        };

        let checksum = image.checksum();
        if self.image_checksum.as_deref() == Some(checksum.as_str()) {
            debug!(selection = %self.target, "Image unchanged");
            return Ok(None);
        }

        info!(selection = %self.target, width = image.width, height = image.height, "New image");
        self.select_image(&image, checksum)?;
        Ok(Some(image))
    }

    /// Put a history item back on the live selection.
    ///
    /// Nothing is written when the item is what the selection already holds.
    pub fn select_item(&mut self, item: &Item) -> Result<(), TrackerError> {
        match item {
            Item::Image(image) => {
                if self.image_checksum.as_deref() != Some(image.checksum()) {
                    self.select_image(image.image(), image.checksum().to_string())?;
                }
            }
            Item::Uris(uris) => {
                if self.text.as_deref() != Some(uris.value()) {
                    self.select_uris(uris)?;
                }
            }
            Item::Text(text) => {
                if self.text.as_deref() != Some(text.value()) {
                    self.select_text(text.value())?;
                }
            }
        }
        Ok(())
    }

    /// Register a listener for owner changes of the tracked selection
    pub fn connect_owner_change<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&OwnerChangeEvent) + 'static,
    {
        ListenerId(self.listeners.borrow_mut().add(Box::new(listener)))
    }

    /// Remove a listener. Returns false when it was not registered.
    pub fn disconnect_owner_change(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id.0)
    }
}

impl<C, S> Drop for ClipboardTracker<C, S>
where
    C: LiveClipboard,
    S: Settings,
{
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.real.disconnect_owner_change(id);
            debug!(selection = %self.target, "Stopped tracking selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_removes_ascii_whitespace() {
        assert_eq!(strip("  hello\t\n"), "hello");
        assert_eq!(strip("\x0b\x0cx\r"), "x");
        assert_eq!(strip(" \n\t "), "");
        assert_eq!(strip("a b"), "a b");
    }

    #[test]
    fn strip_keeps_unicode_spaces() {
        assert_eq!(strip("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
    }
}
