//! History items
//!
//! The set of item variants is closed; callers dispatch with an exhaustive match.

mod image;
mod uris;

use std::fmt;

pub use image::{ImageItem, PixelBuffer};
pub use uris::UrisItem;

/// History item holding plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    value: String,
}

impl TextItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Item variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Text,
    Image,
    Uris,
}

impl ItemKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Uris => "uris",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized history item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Text(TextItem),
    Image(ImageItem),
    Uris(UrisItem),
}

impl Item {
    /// Shorthand for a text item
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextItem::new(value))
    }

    /// Canonical textual representation
    pub fn value(&self) -> &str {
        match self {
            Self::Text(item) => item.value(),
            Self::Image(item) => item.value(),
            Self::Uris(item) => item.value(),
        }
    }

    /// Variant tag
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Text(_) => ItemKind::Text,
            Self::Image(_) => ItemKind::Image,
            Self::Uris(_) => ItemKind::Uris,
        }
    }
}

impl From<TextItem> for Item {
    fn from(item: TextItem) -> Self {
        Self::Text(item)
    }
}

impl From<ImageItem> for Item {
    fn from(item: ImageItem) -> Self {
        Self::Image(item)
    }
}

impl From<UrisItem> for Item {
    fn from(item: UrisItem) -> Self {
        Self::Uris(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_dispatches_per_variant() {
        assert_eq!(Item::text("hello").value(), "hello");
        let uris = Item::from(UrisItem::new("/a", vec!["file:///a".into()]));
        assert_eq!(uris.value(), "/a");
        let image = Item::from(ImageItem::new(PixelBuffer::new(1, 1, vec![0; 4])));
        assert_eq!(image.value(), "[Image, 1 x 1]");
    }

    #[test]
    fn kind_tags() {
        assert_eq!(Item::text("a").kind(), ItemKind::Text);
        assert_eq!(ItemKind::Uris.to_string(), "uris");
    }
}
