//! Record types handed to the grouper and matcher.

use serde::Serialize;

/// A reference or example entry located by a slash-delimited path.
///
/// The first path segment is the category, the second (if present) the
/// subcategory. Deeper segments are carried but not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    /// Slash-delimited path, e.g. `Basics/Color/Brightness`
    pub relative_path: String,

    /// Identifier of the entry (name or slug)
    pub identifier: String,
}

impl ContentRecord {
    /// Create a new record.
    pub fn new(relative_path: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            identifier: identifier.into(),
        }
    }

    /// First path segment, if non-empty.
    pub fn category(&self) -> Option<&str> {
        self.relative_path.split('/').next().filter(|s| !s.is_empty())
    }

    /// Second path segment, if present and non-empty.
    pub fn subcategory(&self) -> Option<&str> {
        self.relative_path.split('/').nth(1).filter(|s| !s.is_empty())
    }
}

/// A code example attached to a reference entry or example page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleRecord {
    /// Base name shared with the preview image
    pub name: String,

    /// Source code
    pub code_text: String,
}

impl ExampleRecord {
    /// Create a new example.
    pub fn new(name: impl Into<String>, code_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code_text: code_text.into(),
        }
    }

    /// Source lines with `\n` and `\r\n` terminators removed.
    pub fn lines(&self) -> Vec<&str> {
        self.code_text.lines().collect()
    }
}

/// A preview image for an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// Base name shared with the example
    pub name: String,

    /// Opaque asset handle (the builder stores the published URL here)
    pub asset: String,
}

impl ImageRecord {
    /// Create a new image record.
    pub fn new(name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_path_segments() {
        let record = ContentRecord::new("Basics/Color/Brightness", "brightness");

        assert_eq!(record.category(), Some("Basics"));
        assert_eq!(record.subcategory(), Some("Color"));
    }

    #[test]
    fn missing_segments_are_none() {
        assert_eq!(ContentRecord::new("Color", "c").subcategory(), None);
        assert_eq!(ContentRecord::new("Color/", "c").subcategory(), None);
        assert_eq!(ContentRecord::new("", "c").category(), None);
        assert_eq!(ContentRecord::new("/Color", "c").category(), None);
    }

    #[test]
    fn example_lines_strip_crlf() {
        let example = ExampleRecord::new("abs_0", "int a = 1;\r\nint b = abs(a);\n");

        assert_eq!(example.lines(), vec!["int a = 1;", "int b = abs(a);"]);
    }
}
