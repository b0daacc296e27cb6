//! Negotiated selection formats
//!
//! Applications ask a selection owner for its content under a named format
//! ("target"). These helpers classify target names the way X11/Wayland
//! toolkits do and build the lists an owner advertises.

use std::fmt;

/// Private target used by file managers for copy/cut of files
pub const COPIED_FILES_TARGET: &str = "x-special/gnome-copied-files";

/// Target for a list of URIs
pub const URI_LIST_TARGET: &str = "text/uri-list";

const TEXT_TARGETS: &[&str] = &[
    "UTF8_STRING",
    "TEXT",
    "COMPOUND_TEXT",
    "STRING",
    "text/plain;charset=utf-8",
    "text/plain",
];

const IMAGE_TARGETS: &[&str] = &["image/png", "image/bmp", "image/jpeg", "image/tiff"];

/// A selection format name such as `UTF8_STRING` or `text/uri-list`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetFormat(String);

impl TargetFormat {
    /// Wrap a raw target name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The vendor copy-files target
    pub fn copied_files() -> Self {
        Self::new(COPIED_FILES_TARGET)
    }

    /// The URI list target
    pub fn uri_list() -> Self {
        Self::new(URI_LIST_TARGET)
    }

    /// The preferred text target
    pub fn utf8_text() -> Self {
        Self::new(TEXT_TARGETS[0])
    }

    /// The preferred image target
    pub fn png() -> Self {
        Self::new(IMAGE_TARGETS[0])
    }

    /// Target name
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether the target requests text
    pub fn is_text(&self) -> bool {
        TEXT_TARGETS.contains(&self.0.as_str())
            || self.0.eq_ignore_ascii_case("text/plain;charset=utf8")
    }

    /// Whether the target requests an image
    pub fn is_image(&self) -> bool {
        IMAGE_TARGETS.contains(&self.0.as_str())
    }

    /// Whether the target requests a URI list
    pub fn is_uri_list(&self) -> bool {
        self.0 == URI_LIST_TARGET
    }

    /// Whether the target is the vendor copy-files format
    pub fn is_copied_files(&self) -> bool {
        self.0 == COPIED_FILES_TARGET
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetFormat {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// All text targets
pub fn text_targets() -> Vec<TargetFormat> {
    TEXT_TARGETS.iter().copied().map(TargetFormat::new).collect()
}

/// All image targets
pub fn image_targets() -> Vec<TargetFormat> {
    IMAGE_TARGETS.iter().copied().map(TargetFormat::new).collect()
}

/// All URI targets
pub fn uri_targets() -> Vec<TargetFormat> {
    vec![TargetFormat::uri_list()]
}

/// Targets advertised while owning a uris item: text, then URIs, then copy-files.
pub fn uris_offer_targets() -> Vec<TargetFormat> {
    let mut targets = text_targets();
    targets.extend(uri_targets());
    targets.push(TargetFormat::copied_files());
    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_text_targets() {
        assert!(TargetFormat::new("UTF8_STRING").is_text());
        assert!(TargetFormat::new("text/plain").is_text());
        assert!(!TargetFormat::uri_list().is_text());
        assert!(!TargetFormat::png().is_text());
    }

    #[test]
    fn classifies_image_and_uri_targets() {
        assert!(TargetFormat::png().is_image());
        assert!(TargetFormat::uri_list().is_uri_list());
        assert!(TargetFormat::copied_files().is_copied_files());
        assert!(!TargetFormat::copied_files().is_uri_list());
    }

    #[test]
    fn uris_offer_contains_every_family_once() {
        let targets = uris_offer_targets();
        assert_eq!(targets.len(), TEXT_TARGETS.len() + 2);
        assert!(targets.iter().any(TargetFormat::is_uri_list));
        assert_eq!(targets.last(), Some(&TargetFormat::copied_files()));
    }
}
