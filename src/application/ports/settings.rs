//! Settings port interface

use crate::domain::config::TrackerConfig;

/// Port for the tracker's runtime settings.
///
/// Values are read on every ingest so that a reloaded configuration takes
/// effect on the next clipboard change.
pub trait Settings {
    /// Whether surrounding whitespace is stripped from text items
    fn trim_items(&self) -> bool;

    /// Minimum text item length in bytes
    fn min_text_item_size(&self) -> usize;

    /// Maximum text item length in bytes
    fn max_text_item_size(&self) -> usize;
}

impl Settings for TrackerConfig {
    fn trim_items(&self) -> bool {
        self.trim_items_or_default()
    }

    fn min_text_item_size(&self) -> usize {
        self.min_text_item_size_or_default() as usize
    }

    fn max_text_item_size(&self) -> usize {
        self.max_text_item_size_or_default() as usize
    }
}

impl<S: Settings> Settings for std::cell::RefCell<S> {
    fn trim_items(&self) -> bool {
        self.borrow().trim_items()
    }

    fn min_text_item_size(&self) -> usize {
        self.borrow().min_text_item_size()
    }

    fn max_text_item_size(&self) -> usize {
        self.borrow().max_text_item_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn config_settings_use_defaults() {
        let config = TrackerConfig::empty();
        assert!(!config.trim_items());
        assert_eq!(config.min_text_item_size(), 1);
        assert_eq!(config.max_text_item_size(), u32::MAX as usize);
    }

    #[test]
    fn refcell_settings_see_reloads() {
        let settings = RefCell::new(TrackerConfig::defaults());
        assert!(!settings.trim_items());
        settings.borrow_mut().trim_items = Some(true);
        assert!(settings.trim_items());
    }
}
