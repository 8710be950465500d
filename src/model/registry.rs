//! Registry of fragments keyed by full label.

use indexmap::IndexMap;

use crate::config::AmbiguityPolicy;
use crate::errors::{Result, TangleError};
use crate::text_location::TextLocation;

use super::fragment::Fragment;
use super::label::FragmentLabel;
use super::resolver::{resolve, Resolution};

/// All fragments of a document plus the root pointer.
///
/// Filled in document order while scanning and never shrinks. Fragments keep
/// their definition order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    fragments: IndexMap<FragmentLabel, Fragment>,
    root: Option<FragmentLabel>,
    ambiguity: AmbiguityPolicy,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given ambiguous-initialization policy.
    #[must_use]
    pub fn with_policy(ambiguity: AmbiguityPolicy) -> Self {
        Self {
            ambiguity,
            ..Self::default()
        }
    }

    /// Resolves a possibly abbreviated label against the current full labels.
    pub fn resolve(&self, label: &str) -> Resolution<'_> {
        resolve(label, self.fragments.keys())
    }

    /// Declares `label` as the root fragment.
    ///
    /// An existing fragment with that exact label keeps its content.
    pub fn declare_root(&mut self, label: &str, location: TextLocation) -> Result<()> {
        if let Some(previous) = &self.root {
            return Err(TangleError::DuplicateRoot {
                label: label.to_string(),
                previous: previous.to_string(),
                location,
            });
        }

        let label = FragmentLabel::new(label);
        tracing::debug!("Declaring root `{}` at {}", label, location);
        self.fragments
            .entry(label.clone())
            .or_insert_with(|| Fragment::empty(label.clone(), location));
        self.root = Some(label);
        Ok(())
    }

    /// Sets the content of a fragment for the first time.
    ///
    /// A unique match receives the content if it is still empty. Otherwise the
    /// label text becomes a new full label.
    pub fn initialize(&mut self, label: &str, content: &str, location: TextLocation) -> Result<()> {
        let target = match self.resolve(label) {
            Resolution::Unique(full) => Some(full.clone()),
            Resolution::Missing => None,
            Resolution::Ambiguous(candidates) => {
                let candidates: Vec<String> = candidates.iter().map(|l| l.to_string()).collect();
                if self.ambiguity == AmbiguityPolicy::Error {
                    return Err(TangleError::AmbiguousInit {
                        label: label.to_string(),
                        candidates,
                        location,
                    });
                }
                tracing::warn!(
                    "Ambiguous label `{}` at {} (matches {}); defining it as a new label",
                    label,
                    location,
                    candidates.join(", ")
                );
                None
            }
        };

        match target {
            Some(full) => {
                let fragment = self
                    .fragments
                    .get_mut(&full)
                    .ok_or_else(|| TangleError::UnknownLabel {
                        label: full.to_string(),
                        candidates: Vec::new(),
                    })?;
                if !fragment.is_empty() {
                    return Err(TangleError::DoubleInit {
                        label: full.to_string(),
                        location,
                    });
                }
                tracing::debug!("Initializing `{}` at {}", full, location);
                fragment.set_content(content);
            }
            None => {
                let full = FragmentLabel::new(label);
                tracing::debug!("Defining `{}` at {}", full, location);
                self.fragments
                    .insert(full.clone(), Fragment::new(full, content, location));
            }
        }
        Ok(())
    }

    /// Appends to an existing fragment.
    pub fn append(&mut self, label: &str, content: &str, location: TextLocation) -> Result<()> {
        let full = match self.resolve(label) {
            Resolution::Unique(full) => full.clone(),
            _ => {
                return Err(TangleError::UninitializedAppend {
                    label: label.to_string(),
                    location,
                })
            }
        };

        tracing::debug!("Appending to `{}` at {}", full, location);
        if let Some(fragment) = self.fragments.get_mut(&full) {
            fragment.append(content);
        }
        Ok(())
    }

    /// Returns the content of the fragment `label` resolves to.
    pub fn lookup(&self, label: &str) -> Result<&str> {
        match self.resolve(label) {
            Resolution::Unique(full) => self
                .get(full.as_str())
                .map(Fragment::content)
                .ok_or_else(|| unknown_label(label, Vec::new())),
            other => Err(unknown_label(label, other.candidates())),
        }
    }

    /// Gets a fragment by its exact full label.
    pub fn get(&self, full_label: &str) -> Option<&Fragment> {
        self.fragments.get(full_label)
    }

    /// Returns the root label, if one was declared.
    pub fn root(&self) -> Option<&FragmentLabel> {
        self.root.as_ref()
    }

    /// Returns all full labels in definition order.
    pub fn labels(&self) -> impl Iterator<Item = &FragmentLabel> {
        self.fragments.keys()
    }

    /// Returns all fragments in definition order.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.values()
    }

    /// Returns the number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

fn unknown_label(label: &str, candidates: Vec<String>) -> TangleError {
    TangleError::UnknownLabel {
        label: label.to_string(),
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::at;

    #[test]
    fn test_declare_root() {
        let mut reg = Registry::new();
        reg.declare_root("Program", at(1)).unwrap();

        assert_eq!(reg.root().unwrap().as_str(), "Program");
        assert_eq!(reg.lookup("Program").unwrap(), "");
    }

    #[test]
    fn test_duplicate_root() {
        let mut reg = Registry::new();
        reg.declare_root("One", at(1)).unwrap();
        let err = reg.declare_root("Two", at(9)).unwrap_err();

        match err {
            TangleError::DuplicateRoot {
                label,
                previous,
                location,
            } => {
                assert_eq!(label, "Two");
                assert_eq!(previous, "One");
                assert_eq!(location.line, 9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_on_existing_fragment_keeps_content() {
        let mut reg = Registry::new();
        reg.initialize("Main", "body", at(1)).unwrap();
        reg.declare_root("Main", at(5)).unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("Main").unwrap(), "body");
    }

    #[test]
    fn test_initialize_root_by_short_form() {
        let mut reg = Registry::new();
        reg.declare_root("Hello world program", at(1)).unwrap();
        reg.initialize("Hello", "print('hi')", at(3)).unwrap();

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.lookup("Hello world program").unwrap(), "print('hi')");
    }

    #[test]
    fn test_double_init() {
        let mut reg = Registry::new();
        reg.initialize("A", "x", at(1)).unwrap();
        let err = reg.initialize("A", "y", at(4)).unwrap_err();
        assert!(matches!(err, TangleError::DoubleInit { ref label, .. } if label == "A"));
    }

    #[test]
    fn test_reinitialize_empty_fragment() {
        let mut reg = Registry::new();
        reg.initialize("A", "", at(1)).unwrap();
        reg.initialize("A", "x", at(4)).unwrap();
        assert_eq!(reg.lookup("A").unwrap(), "x");
    }

    #[test]
    fn test_append_ordering() {
        let mut reg = Registry::new();
        reg.initialize("A", "x", at(1)).unwrap();
        reg.append("A", "y", at(2)).unwrap();
        reg.append("A", "z", at(3)).unwrap();

        assert_eq!(reg.lookup("A").unwrap(), "xyz");
        assert_eq!(reg.get("A").unwrap().appends, 2);
    }

    #[test]
    fn test_append_by_short_form() {
        let mut reg = Registry::new();
        reg.initialize("Imports", "import os\n", at(1)).unwrap();
        reg.append("Imp", "import sys\n", at(2)).unwrap();
        assert_eq!(reg.lookup("Imports").unwrap(), "import os\nimport sys\n");
    }

    #[test]
    fn test_append_uninitialized() {
        let mut reg = Registry::new();
        let err = reg.append("Nope", "x", at(2)).unwrap_err();
        assert!(matches!(err, TangleError::UninitializedAppend { ref label, .. } if label == "Nope"));
    }

    #[test]
    fn test_append_ambiguous() {
        let mut reg = Registry::new();
        reg.initialize("Help", "a", at(1)).unwrap();
        reg.initialize("Hello", "b", at(2)).unwrap();
        let err = reg.append("Hel", "c", at(3)).unwrap_err();
        assert!(matches!(err, TangleError::UninitializedAppend { .. }));
    }

    #[test]
    fn test_ambiguous_initialize_creates_new_label() {
        let mut reg = Registry::new();
        reg.initialize("Help", "a", at(1)).unwrap();
        reg.initialize("Hello", "b", at(2)).unwrap();
        reg.initialize("Hel", "c", at(3)).unwrap();

        let labels: Vec<_> = reg.labels().map(FragmentLabel::as_str).collect();
        assert_eq!(labels, vec!["Help", "Hello", "Hel"]);
        assert_eq!(reg.lookup("Hel").unwrap(), "c");
    }

    #[test]
    fn test_ambiguous_initialize_strict() {
        let mut reg = Registry::with_policy(AmbiguityPolicy::Error);
        reg.initialize("Help", "a", at(1)).unwrap();
        reg.initialize("Hello", "b", at(2)).unwrap();
        let err = reg.initialize("Hel", "c", at(3)).unwrap_err();

        match err {
            TangleError::AmbiguousInit { candidates, .. } => {
                assert_eq!(candidates, vec!["Help", "Hello"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_lookup_unknown() {
        let reg = Registry::new();
        let err = reg.lookup("ghost").unwrap_err();
        assert!(matches!(
            err,
            TangleError::UnknownLabel { ref label, ref candidates } if label == "ghost" && candidates.is_empty()
        ));
    }

    #[test]
    fn test_lookup_ambiguous_lists_candidates() {
        let mut reg = Registry::new();
        reg.initialize("ab", "1", at(1)).unwrap();
        reg.initialize("ac", "2", at(2)).unwrap();

        match reg.lookup("a").unwrap_err() {
            TangleError::UnknownLabel { candidates, .. } => {
                assert_eq!(candidates, vec!["ab", "ac"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_prefix_becomes_ambiguous_later() {
        let mut reg = Registry::new();
        reg.initialize("Alpha", "1", at(1)).unwrap();
        assert_eq!(reg.lookup("Al").unwrap(), "1");

        reg.initialize("Altitude", "2", at(2)).unwrap();
        assert!(reg.lookup("Al").is_err());
        assert_eq!(reg.lookup("Alp").unwrap(), "1");
    }
}
