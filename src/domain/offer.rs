//! Content offered while owning a selection

use super::item::{Item, PixelBuffer};
use super::target::TargetFormat;

/// Data handed to a requesting application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionData {
    Text(String),
    Image(PixelBuffer),
    Uris(Vec<String>),
    /// Raw bytes under a private target; `format` is the bit width of each unit
    Raw {
        target: TargetFormat,
        format: u8,
        data: Vec<u8>,
    },
}

impl SelectionData {
    /// Declared length of the payload in units
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Image(image) => image.bytes.len(),
            Self::Uris(uris) => uris.len(),
            Self::Raw { data, .. } => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The item a tracker serves while it owns a selection.
///
/// The platform keeps one of these in its ownership slot and drops it when another
/// client takes the selection over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferedContent {
    item: Item,
}

impl OfferedContent {
    pub fn new(item: Item) -> Self {
        Self { item }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Answer a content request for `format`.
    ///
    /// Text requests always get the item value. Images are only served under image
    /// targets. A uris item answers URI list requests with the URIs and anything else
    /// with the copy-files payload, NUL terminated: file managers read the declared
    /// length including that terminator.
    pub fn serve(&self, format: &TargetFormat) -> Option<SelectionData> {
        if format.is_text() {
            return Some(SelectionData::Text(self.item.value().to_string()));
        }

        match &self.item {
            Item::Image(image) => format
                .is_image()
                .then(|| SelectionData::Image(image.image().clone())),
            Item::Uris(uris) if format.is_uri_list() => {
                Some(SelectionData::Uris(uris.uris().to_vec()))
            }
            Item::Uris(uris) => {
                let mut data = uris.copied_files_payload().into_bytes();
                data.push(0);
                Some(SelectionData::Raw {
                    target: TargetFormat::copied_files(),
                    format: 8,
                    data,
                })
            }
            Item::Text(_) => None,
        }
    }

    /// Release the offered item once ownership is lost.
    pub fn release(self) -> Item {
        tracing::debug!(kind = %self.item.kind(), "Selection ownership lost, releasing item");
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ImageItem, UrisItem};

    fn uris_offer() -> OfferedContent {
        OfferedContent::new(Item::from(UrisItem::new(
            "/a\n/b",
            vec!["file:///a".to_string(), "file:///b".to_string()],
        )))
    }

    #[test]
    fn text_request_gets_value() {
        let served = uris_offer().serve(&TargetFormat::utf8_text());
        assert_eq!(served, Some(SelectionData::Text("/a\n/b".to_string())));
    }

    #[test]
    fn uri_request_gets_uris() {
        let served = uris_offer().serve(&TargetFormat::uri_list());
        assert_eq!(
            served,
            Some(SelectionData::Uris(vec!["file:///a".into(), "file:///b".into()]))
        );
    }

    #[test]
    fn copied_files_request_is_nul_terminated() {
        let served = uris_offer().serve(&TargetFormat::copied_files()).unwrap();
        let expected = "copy\nfile:///a\nfile:///b";
        match &served {
            SelectionData::Raw {
                target,
                format,
                data,
            } => {
                assert!(target.is_copied_files());
                assert_eq!(*format, 8);
                assert_eq!(&data[..expected.len()], expected.as_bytes());
                assert_eq!(data.last(), Some(&0));
            }
            other => panic!("unexpected data: {:?}", other),
        }
        assert_eq!(served.len(), expected.len() + 1);
        assert_eq!(served.len(), 25);
    }

    #[test]
    fn image_served_only_as_image() {
        let pixels = PixelBuffer::new(1, 1, vec![9, 9, 9, 255]);
        let offer = OfferedContent::new(Item::from(ImageItem::new(pixels.clone())));
        assert_eq!(
            offer.serve(&TargetFormat::png()),
            Some(SelectionData::Image(pixels))
        );
        assert_eq!(offer.serve(&TargetFormat::uri_list()), None);
        assert_eq!(
            offer.serve(&TargetFormat::new("STRING")),
            Some(SelectionData::Text("[Image, 1 x 1]".into()))
        );
    }

    #[test]
    fn text_item_ignores_non_text_requests() {
        let offer = OfferedContent::new(Item::text("hi"));
        assert_eq!(offer.serve(&TargetFormat::uri_list()), None);
    }

    #[test]
    fn release_returns_item() {
        let offer = OfferedContent::new(Item::text("hi"));
        assert_eq!(offer.release(), Item::text("hi"));
    }
}
