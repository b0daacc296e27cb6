//! System clipboard adapter using clipboard-rs
//!
//! A clipboard-rs watcher runs on its own thread and wakes the event loop on
//! every owner change; the loop then calls [`SystemDisplay::dispatch`], which
//! delivers the change on the main thread. clipboard-rs only reaches the
//! clipboard selection, so the primary selection reports no notification
//! support.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;
use std::sync::{mpsc, Arc};
use std::thread;

use clipboard_rs::common::RustImage;
use clipboard_rs::{
    Clipboard, ClipboardContent, ClipboardContext, ClipboardHandler, ClipboardWatcher,
    ClipboardWatcherContext, ContentFormat, RustImageData, WatcherShutdown,
};
use tokio::sync::Notify;
use tracing::{debug, trace, warn};

use crate::application::listeners::ListenerList;
use crate::application::ports::{
    ClipboardError, Display, LiveClipboard, OwnerChangeHandler, SubscriptionId,
};
use crate::domain::event::{OwnerChangeEvent, OwnerChangeReason};
use crate::domain::item::{Item, PixelBuffer};
use crate::domain::offer::{OfferedContent, SelectionData};
use crate::domain::selection::SelectionTarget;
use crate::domain::target::TargetFormat;

/// Watcher handler waking the event loop
struct ChangeWaker {
    notify: Arc<Notify>,
}

impl ClipboardHandler for ChangeWaker {
    fn on_clipboard_change(&mut self) {
        self.notify.notify_one();
    }
}

fn start_watcher(notify: Arc<Notify>) -> Result<WatcherShutdown, ClipboardError> {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("clipboard-watcher".to_string())
        .spawn(move || {
            let mut watcher = match ClipboardWatcherContext::new() {
                Ok(watcher) => watcher,
                Err(e) => {
                    let _ = tx.send(Err(e.to_string()));
                    return;
                }
            };
            let shutdown = watcher
                .add_handler(ChangeWaker { notify })
                .get_shutdown_channel();
            if tx.send(Ok(shutdown)).is_ok() {
                watcher.start_watch();
            }
        })
        .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

    rx.recv()
        .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?
        .map_err(ClipboardError::ClipboardUnavailable)
}

fn read_failed(e: impl std::fmt::Display) -> ClipboardError {
    ClipboardError::ReadFailed(e.to_string())
}

fn write_failed(e: impl std::fmt::Display) -> ClipboardError {
    ClipboardError::WriteFailed(e.to_string())
}

fn to_pixels(image: &RustImageData) -> Result<PixelBuffer, ClipboardError> {
    let png = image.to_png().map_err(read_failed)?;
    let rgba = image::load_from_memory_with_format(png.get_bytes(), image::ImageFormat::Png)
        .map_err(read_failed)?
        .into_rgba8();
    Ok(PixelBuffer::new(
        rgba.width() as usize,
        rgba.height() as usize,
        rgba.into_raw(),
    ))
}

fn to_rust_image(pixels: &PixelBuffer) -> Result<RustImageData, ClipboardError> {
    let width = u32::try_from(pixels.width).map_err(write_failed)?;
    let height = u32::try_from(pixels.height).map_err(write_failed)?;
    let rgba = image::RgbaImage::from_raw(width, height, pixels.bytes.clone())
        .ok_or_else(|| write_failed("pixel data does not match the image size"))?;

    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(write_failed)?;
    RustImageData::from_bytes(&png).map_err(write_failed)
}

/// Contents published for an offer advertising `targets`
fn offer_contents(
    targets: &[TargetFormat],
    offer: &OfferedContent,
) -> Result<Vec<ClipboardContent>, ClipboardError> {
    let mut contents = Vec::new();

    for target in targets {
        match offer.serve(target) {
            Some(SelectionData::Text(text)) if target.is_text() => {
                if !contents.iter().any(|c| matches!(c, ClipboardContent::Text(_))) {
                    contents.push(ClipboardContent::Text(text));
                }
            }
            Some(SelectionData::Uris(uris)) => contents.push(ClipboardContent::Files(uris)),
            Some(SelectionData::Image(pixels)) => {
                if !contents.iter().any(|c| matches!(c, ClipboardContent::Image(_))) {
                    contents.push(ClipboardContent::Image(to_rust_image(&pixels)?));
                }
            }
            Some(SelectionData::Raw { target, data, .. }) => {
                contents.push(ClipboardContent::Other(target.name().to_string(), data));
            }
            _ => {}
        }
    }

    if contents.is_empty() {
        return Err(write_failed("offer serves none of its targets"));
    }
    Ok(contents)
}

/// The system clipboard selection
#[derive(Clone)]
pub struct SystemClipboard {
    target: SelectionTarget,
    context: Rc<ClipboardContext>,
    handlers: Rc<RefCell<ListenerList>>,
    offer: Rc<RefCell<Option<OfferedContent>>>,
}

impl SystemClipboard {
    fn new(target: SelectionTarget) -> Result<Self, ClipboardError> {
        if target != SelectionTarget::Clipboard {
            return Err(ClipboardError::UnsupportedSelection(target));
        }

        let context =
            ClipboardContext::new().map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;
        Ok(Self {
            target,
            context: Rc::new(context),
            handlers: Rc::new(RefCell::new(ListenerList::default())),
            offer: Rc::new(RefCell::new(None)),
        })
    }

    fn release_offer(&self) {
        if let Some(offer) = self.offer.borrow_mut().take() {
            offer.release();
        }
    }

    /// Whether the selection still holds what `offer` published
    fn still_owns(&self, offer: &OfferedContent) -> bool {
        match offer.item() {
            Item::Uris(uris) => self
                .context
                .get_files()
                .map(|files| files == uris.uris())
                .unwrap_or(false),
            Item::Text(text) => self
                .context
                .get_text()
                .map(|current| current == text.value())
                .unwrap_or(false),
            Item::Image(_) => self.context.has(ContentFormat::Image),
        }
    }

    fn owner_changed(&self) {
        let lost = match &*self.offer.borrow() {
            Some(offer) => !self.still_owns(offer),
            None => false,
        };
        if lost {
            self.release_offer();
        }

        let empty = self
            .context
            .available_formats()
            .map(|formats| formats.is_empty())
            .unwrap_or(true);
        let reason = if empty {
            OwnerChangeReason::Close
        } else {
            OwnerChangeReason::NewOwner
        };

        trace!(selection = %self.target, reason = %reason, "Owner change");
        ListenerList::emit(&self.handlers, &OwnerChangeEvent::new(self.target, reason));
    }
}

impl LiveClipboard for SystemClipboard {
    fn wait_for_text(&self) -> Result<Option<String>, ClipboardError> {
        if !self.context.has(ContentFormat::Text) {
            return Ok(None);
        }
        self.context.get_text().map(Some).map_err(read_failed)
    }

    fn wait_for_image(&self) -> Result<Option<PixelBuffer>, ClipboardError> {
        if !self.context.has(ContentFormat::Image) {
            return Ok(None);
        }
        let image = self.context.get_image().map_err(read_failed)?;
        to_pixels(&image).map(Some)
    }

    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.context
            .set_text(text.to_string())
            .map_err(write_failed)?;
        self.release_offer();
        Ok(())
    }

    fn set_image(&self, image: &PixelBuffer) -> Result<(), ClipboardError> {
        self.context
            .set_image(to_rust_image(image)?)
            .map_err(write_failed)?;
        self.release_offer();
        Ok(())
    }

    fn set_with_owner(
        &self,
        targets: &[TargetFormat],
        offer: OfferedContent,
    ) -> Result<(), ClipboardError> {
        let contents = offer_contents(targets, &offer)?;
        self.context.set(contents).map_err(write_failed)?;

        if let Some(previous) = self.offer.borrow_mut().replace(offer) {
            previous.release();
        }
        Ok(())
    }

    fn store(&self) -> Result<(), ClipboardError> {
        // No store request in clipboard-rs; a running clipboard manager copies on its own
        debug!(selection = %self.target, "Store requested");
        Ok(())
    }

    fn connect_owner_change(&self, handler: OwnerChangeHandler) -> SubscriptionId {
        SubscriptionId(self.handlers.borrow_mut().add(handler))
    }

    fn disconnect_owner_change(&self, id: SubscriptionId) {
        self.handlers.borrow_mut().remove(id.0);
    }
}

/// Display backed by the system clipboard
pub struct SystemDisplay {
    notify: Arc<Notify>,
    watcher: RefCell<Option<WatcherShutdown>>,
    selections: RefCell<Vec<SystemClipboard>>,
}

impl SystemDisplay {
    pub fn new() -> Self {
        Self {
            notify: Arc::new(Notify::new()),
            watcher: RefCell::new(None),
            selections: RefCell::new(Vec::new()),
        }
    }

    /// Wait until the watcher reports an owner change
    pub async fn changed(&self) {
        self.notify.notified().await;
    }

    /// Deliver an owner change to every opened selection
    pub fn dispatch(&self) {
        let selections = self.selections.borrow().clone();
        for selection in &selections {
            selection.owner_changed();
        }
    }
}

impl Default for SystemDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SystemDisplay {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.get_mut().take() {
            watcher.stop();
        }
    }
}

impl Display for SystemDisplay {
    type Clipboard = SystemClipboard;

    fn request_selection_notification(&self, target: SelectionTarget) -> bool {
        if target != SelectionTarget::Clipboard {
            return false;
        }
        if self.watcher.borrow().is_some() {
            return true;
        }

        match start_watcher(Arc::clone(&self.notify)) {
            Ok(shutdown) => {
                *self.watcher.borrow_mut() = Some(shutdown);
                true
            }
            Err(e) => {
                warn!(error = %e, "Cannot watch the clipboard");
                false
            }
        }
    }

    fn clipboard(&self, target: SelectionTarget) -> Result<SystemClipboard, ClipboardError> {
        let clipboard = SystemClipboard::new(target)?;
        self.selections.borrow_mut().push(clipboard.clone());
        Ok(clipboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{TextItem, UrisItem};
    use crate::domain::target::uris_offer_targets;

    fn uris_offer() -> OfferedContent {
        OfferedContent::new(Item::from(UrisItem::new(
            "/a\n/b",
            vec!["file:///a".to_string(), "file:///b".to_string()],
        )))
    }

    #[test]
    fn uris_offer_publishes_text_files_and_copied_files() {
        let contents = offer_contents(&uris_offer_targets(), &uris_offer()).unwrap();

        let texts: Vec<&String> = contents
            .iter()
            .filter_map(|c| match c {
                ClipboardContent::Text(text) => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["/a\n/b"]);

        assert!(contents.iter().any(|c| matches!(
            c,
            ClipboardContent::Files(files) if files == &["file:///a", "file:///b"]
        )));
        assert!(contents.iter().any(|c| matches!(
            c,
            ClipboardContent::Other(format, data)
                if format == "x-special/gnome-copied-files"
                    && data.as_slice() == b"copy\nfile:///a\nfile:///b\0"
        )));
    }

    #[test]
    fn offer_without_matching_target_is_refused() {
        let offer = OfferedContent::new(Item::Text(TextItem::new("plain")));
        assert!(matches!(
            offer_contents(&[TargetFormat::png()], &offer),
            Err(ClipboardError::WriteFailed(_))
        ));
    }

    #[test]
    fn pixels_survive_png_conversion() {
        let pixels = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]);
        let image = to_rust_image(&pixels).unwrap();
        assert_eq!(to_pixels(&image).unwrap(), pixels);
    }

    #[test]
    fn mismatched_pixel_data_is_rejected() {
        let pixels = PixelBuffer::new(4, 4, vec![0; 3]);
        assert!(to_rust_image(&pixels).is_err());
    }

    #[test]
    fn primary_has_no_notifications() {
        let display = SystemDisplay::new();
        assert!(!display.request_selection_notification(SelectionTarget::Primary));
        assert!(matches!(
            display.clipboard(SelectionTarget::Primary),
            Err(ClipboardError::UnsupportedSelection(SelectionTarget::Primary))
        ));
    }
}
