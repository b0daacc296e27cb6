//! Image items

use crate::domain::checksum::sha256_hex;

/// Raw RGBA pixel data as delivered by the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Create a pixel buffer
    pub fn new(width: usize, height: usize, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    /// Checksum of the raw pixel bytes
    pub fn checksum(&self) -> String {
        sha256_hex(&self.bytes)
    }
}

/// History item holding an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageItem {
    value: String,
    image: PixelBuffer,
    checksum: String,
}

impl ImageItem {
    /// Create an image item, computing its checksum
    pub fn new(image: PixelBuffer) -> Self {
        let checksum = image.checksum();
        let value = format!("[Image, {} x {}]", image.width, image.height);
        Self {
            value,
            image,
            checksum,
        }
    }

    /// Display value of the item
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The pixel buffer
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// SHA-256 hex digest of the pixels
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}
