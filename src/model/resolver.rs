//! Resolution of abbreviated labels against the known full labels.

use super::label::FragmentLabel;

/// Outcome of resolving a possibly abbreviated label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Exactly one full label matches.
    Unique(&'a FragmentLabel),
    /// No full label starts with the candidate.
    Missing,
    /// Several full labels start with the candidate and none equals it.
    Ambiguous(Vec<&'a FragmentLabel>),
}

impl<'a> Resolution<'a> {
    /// Returns the resolved label, if unique.
    pub fn unique(&self) -> Option<&'a FragmentLabel> {
        match self {
            Self::Unique(label) => Some(label),
            _ => None,
        }
    }

    /// Lists the competing full labels; empty unless ambiguous.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Ambiguous(labels) => labels.iter().map(|l| l.to_string()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Resolves `candidate` against `labels`.
///
/// A full label qualifies when `candidate` is a non-empty prefix of it. An
/// exact match always wins, so a full label stays addressable after longer
/// labels sharing its prefix are defined. Nothing is cached: the answer
/// reflects `labels` as passed in.
pub fn resolve<'a, I>(candidate: &str, labels: I) -> Resolution<'a>
where
    I: IntoIterator<Item = &'a FragmentLabel>,
{
    let mut matches = Vec::new();
    for label in labels {
        if label.as_str() == candidate && !candidate.is_empty() {
            return Resolution::Unique(label);
        }
        if label.is_abbreviated_by(candidate) {
            matches.push(label);
        }
    }

    match matches.len() {
        0 => Resolution::Missing,
        1 => Resolution::Unique(matches[0]),
        _ => Resolution::Ambiguous(matches),
    }
}
