//! Fragment labels.

use std::borrow::Borrow;
use std::fmt;

/// The full label of a fragment.
///
/// Labels are case-sensitive and stored without surrounding whitespace.
/// Short forms used in references are plain `&str` prefixes of a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentLabel(String);

impl FragmentLabel {
    /// Creates a label, trimming surrounding whitespace.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_string())
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `short` is a non-empty prefix of this label (or the label itself).
    pub fn is_abbreviated_by(&self, short: &str) -> bool {
        !short.is_empty() && self.0.starts_with(short)
    }
}

impl fmt::Display for FragmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FragmentLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FragmentLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for FragmentLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FragmentLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}
