//! Fragments of program text.

use crate::text_location::TextLocation;

use super::label::FragmentLabel;

/// A named piece of program text, grown only by appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    label: FragmentLabel,
    content: String,
    /// Where the fragment was first created.
    pub location: TextLocation,
    /// Number of `+=` blocks merged into the content.
    pub appends: usize,
}

impl Fragment {
    /// Creates a fragment holding `content`.
    pub fn new(label: FragmentLabel, content: impl Into<String>, location: TextLocation) -> Self {
        Self {
            label,
            content: content.into(),
            location,
            appends: 0,
        }
    }

    /// Creates an empty fragment, as done by a root declaration.
    pub fn empty(label: FragmentLabel, location: TextLocation) -> Self {
        Self::new(label, String::new(), location)
    }

    /// Returns the full label.
    pub fn label(&self) -> &FragmentLabel {
        &self.label
    }

    /// Returns the accumulated content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// True while no text has been stored.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub(crate) fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    pub(crate) fn append(&mut self, content: &str) {
        self.content.push_str(content);
        self.appends += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut frag = Fragment::new("x".into(), "x", TextLocation::default());
        frag.append("y");
        frag.append("z");
        assert_eq!(frag.content(), "xyz");
        assert_eq!(frag.appends, 2);
    }

    #[test]
    fn test_empty() {
        let frag = Fragment::empty("root".into(), TextLocation::at_line(4));
        assert!(frag.is_empty());
        assert_eq!(frag.label().as_str(), "root");
        assert_eq!(frag.location.line, 4);
    }
}
