//! URI list items

/// History item holding a list of files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrisItem {
    value: String,
    uris: Vec<String>,
}

impl UrisItem {
    /// Create a uris item from its textual value and URI list
    pub fn new(value: impl Into<String>, uris: Vec<String>) -> Self {
        Self {
            value: value.into(),
            uris,
        }
    }

    /// Build a uris item from newline separated paths or `file://` URIs.
    ///
    /// Returns `None` when a line is neither an absolute path nor a URI.
    pub fn from_text(text: &str) -> Option<Self> {
        let uris = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if line.contains("://") {
                    Some(line.to_string())
                } else if line.starts_with('/') {
                    Some(format!("file://{}", line))
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()?;

        if uris.is_empty() {
            return None;
        }

        Some(Self::new(text, uris))
    }

    /// Canonical text value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// URIs in order
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// Payload understood by file managers for the copy-files target:
    /// `copy` followed by one URI per line.
    pub fn copied_files_payload(&self) -> String {
        let mut payload = String::from("copy");
        for uri in &self.uris {
            payload.push('\n');
            payload.push_str(uri);
        }
        payload
    }
}
