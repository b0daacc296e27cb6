//! Selection watch use case
//!
//! Runs one tracker per selection, queues the owner changes they relay and
//! turns each into a typed history item when the tracker accepts the new
//! content.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::domain::event::OwnerChangeEvent;
use crate::domain::item::{ImageItem, Item, UrisItem};
use crate::domain::selection::SelectionTarget;

use super::ports::{Display, LiveClipboard, Settings};
use super::tracker::{ClipboardTracker, TrackerError};

/// An accepted change of a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub selection: SelectionTarget,
    pub item: Item,
}

/// Watches a set of selections
pub struct SelectionWatch<C, S>
where
    C: LiveClipboard,
    S: Settings,
{
    trackers: Vec<ClipboardTracker<C, S>>,
    pending: Rc<RefCell<VecDeque<OwnerChangeEvent>>>,
}

impl<C, S> SelectionWatch<C, S>
where
    C: LiveClipboard,
    S: Settings,
{
    /// Start a tracker for every selection in `targets`
    pub fn new<D>(display: &D, targets: &[SelectionTarget], settings: Rc<S>) -> Result<Self, TrackerError>
    where
        D: Display<Clipboard = C>,
    {
        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let mut trackers = Vec::with_capacity(targets.len());

        for &target in targets {
            let tracker = ClipboardTracker::new(target, display, Rc::clone(&settings))?;
            let queue = Rc::clone(&pending);
            tracker.connect_owner_change(move |event| queue.borrow_mut().push_back(event.clone()));
            trackers.push(tracker);
        }

        Ok(Self { trackers, pending })
    }

    /// Running trackers
    pub fn trackers(&self) -> &[ClipboardTracker<C, S>] {
        &self.trackers
    }

    /// Tracker for `target`, if watched
    pub fn tracker_mut(&mut self, target: SelectionTarget) -> Option<&mut ClipboardTracker<C, S>> {
        self.trackers.iter_mut().find(|t| t.target() == target)
    }

    /// Number of owner changes waiting to be processed
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Process queued owner changes, returning the accepted ones in order.
    ///
    /// A change the tracker fails to ingest is logged and skipped; the
    /// others in the batch are still returned.
    pub fn process_pending(&mut self) -> Vec<SelectionChange> {
        let mut changes = Vec::new();

        loop {
            let Some(event) = self.pending.borrow_mut().pop_front() else {
                break;
            };

            let Some(tracker) = self.tracker_mut(event.selection) else {
                continue;
            };

            debug!(selection = %event.selection, reason = %event.reason, "Owner changed");
            match ingest(tracker) {
                Ok(Some(item)) => changes.push(SelectionChange {
                    selection: event.selection,
                    item,
                }),
                Ok(None) => {}
                Err(e) => {
                    warn!(selection = %event.selection, error = %e, "Failed to ingest selection change");
                }
            }
        }

        changes
    }

    /// Put `item` back on `target`. Returns false when `target` is not watched.
    pub fn select_item(&mut self, target: SelectionTarget, item: &Item) -> Result<bool, TrackerError> {
        match self.tracker_mut(target) {
            Some(tracker) => {
                tracker.select_item(item)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Pull the new content of a selection: text first, image otherwise.
fn ingest<C, S>(tracker: &mut ClipboardTracker<C, S>) -> Result<Option<Item>, TrackerError>
where
    C: LiveClipboard,
    S: Settings,
{
    if let Some(text) = tracker.set_text()? {
        let text = text.to_string();
        return Ok(Some(match existing_files(&text) {
            Some(uris) => Item::Uris(uris),
            None => Item::text(text),
        }));
    }

    Ok(tracker
        .set_image()?
        .map(|image| Item::Image(ImageItem::new(image))))
}

/// Uris item for text made only of paths to existing files
fn existing_files(text: &str) -> Option<UrisItem> {
    let all_exist = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .all(|line| line.starts_with('/') && Path::new(line).exists());

    if all_exist {
        UrisItem::from_text(text)
    } else {
        None
    }
}
