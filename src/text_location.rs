//! Source positions inside a document, used in error messages.

use std::fmt;
use std::path::{Path, PathBuf};

/// A position within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLocation {
    /// The document path, `None` for standard input or in-memory text.
    pub filename: Option<PathBuf>,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl TextLocation {
    /// Creates a location at the start of `line`.
    pub fn at_line(line: usize) -> Self {
        Self {
            filename: None,
            line,
            column: 1,
        }
    }

    /// Attaches a filename when one is known.
    pub fn within(mut self, filename: Option<&Path>) -> Self {
        self.filename = filename.map(Path::to_path_buf);
        self
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self::at_line(1)
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filename {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.column),
            None => write!(f, "line {}:{}", self.line, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_in_file() {
        let loc = TextLocation::at_line(7).within(Some(Path::new("doc.md")));
        assert_eq!(loc.to_string(), "doc.md:7:1");
    }

    #[test]
    fn test_display_anonymous() {
        assert_eq!(TextLocation::at_line(3).to_string(), "line 3:1");
    }

    #[test]
    fn test_within_none_clears() {
        let loc = TextLocation::at_line(2)
            .within(Some(Path::new("a.md")))
            .within(None);
        assert!(loc.filename.is_none());
    }
}
