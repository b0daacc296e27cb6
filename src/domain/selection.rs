//! Selection identifiers

use std::fmt;
use std::str::FromStr;

use super::error::InvalidSelectionError;

/// A windowing-system selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionTarget {
    /// Explicit copy/paste selection
    #[default]
    Clipboard,
    /// Mouse-selection driven selection
    Primary,
}

impl SelectionTarget {
    /// All selections, in tracking order
    pub const ALL: [SelectionTarget; 2] = [Self::Clipboard, Self::Primary];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::Primary => "primary",
        }
    }

    /// Whether text pushed back onto this selection may be rewritten in place.
    ///
    /// Only the copy/paste selection is normalized: rewriting primary while the user
    /// is still dragging a mouse selection would fight with them.
    pub const fn allows_normalization(&self) -> bool {
        matches!(self, Self::Clipboard)
    }
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SelectionTarget {
    type Err = InvalidSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clipboard" => Ok(Self::Clipboard),
            "primary" => Ok(Self::Primary),
            _ => Err(InvalidSelectionError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_selections() {
        assert_eq!("clipboard".parse::<SelectionTarget>().unwrap(), SelectionTarget::Clipboard);
        assert_eq!("PRIMARY".parse::<SelectionTarget>().unwrap(), SelectionTarget::Primary);
    }

    #[test]
    fn rejects_unknown_selection() {
        let err = "secondary".parse::<SelectionTarget>().unwrap_err();
        assert_eq!(err.input, "secondary");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SelectionTarget::Clipboard.to_string(), "clipboard");
        assert_eq!(SelectionTarget::Primary.to_string(), "primary");
    }

    #[test]
    fn only_clipboard_is_normalized() {
        assert!(SelectionTarget::Clipboard.allows_normalization());
        assert!(!SelectionTarget::Primary.allows_normalization());
    }
}
