//! CLI presenter for output formatting

use colored::*;

use crate::application::SelectionChange;
use crate::domain::item::Item;

/// Longest preview of a text item, in characters
const PREVIEW_CHARS: usize = 60;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print an accepted selection change to stdout
    pub fn change(&self, change: &SelectionChange) {
        println!(
            "{} {}",
            format!("[{}]", change.selection).cyan(),
            format_item(&change.item)
        );
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line description of an item
pub fn format_item(item: &Item) -> String {
    match item {
        Item::Text(text) => format!("text: {}", preview(text.value())),
        Item::Image(image) => format!("image: {} ({})", image.value(), &image.checksum()[..12]),
        Item::Uris(uris) => format!("uris: {}", uris.uris().join(" ")),
    }
}

/// Single-line preview, shortened to [`PREVIEW_CHARS`]
fn preview(text: &str) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() > PREVIEW_CHARS {
        let head: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ImageItem, PixelBuffer, UrisItem};

    #[test]
    fn preview_flattens_newlines() {
        assert_eq!(preview("a\nb\tc"), "a b c");
    }

    #[test]
    fn preview_truncates_long_text() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 1);
        assert!(shown.ends_with('…'));
    }

    #[test]
    fn format_item_per_kind() {
        assert_eq!(format_item(&Item::text("hi")), "text: hi");
        let uris = Item::from(UrisItem::new("/a", vec!["file:///a".into()]));
        assert_eq!(format_item(&uris), "uris: file:///a");
        let image = Item::from(ImageItem::new(PixelBuffer::new(1, 1, vec![0; 4])));
        assert!(format_item(&image).starts_with("image: [Image, 1 x 1] ("));
    }
}
