//! Shared test utilities.

use crate::model::Registry;
use crate::text_location::TextLocation;

/// Shorthand for a location on `line`.
pub fn at(line: usize) -> TextLocation {
    TextLocation::at_line(line)
}

/// Builds a registry with `root` declared and each `(label, content)` initialized in order.
pub fn registry_with_root(root: &str, fragments: &[(&str, &str)]) -> Registry {
    let mut registry = Registry::new();
    registry.declare_root(root, at(1)).unwrap();
    for (line, (label, content)) in fragments.iter().enumerate() {
        registry.initialize(label, content, at(line + 2)).unwrap();
    }
    registry
}
