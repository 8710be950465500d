//! Tangle algorithm: expanding bracketed references into program text.

use std::collections::HashSet;

use crate::config::Markers;
use crate::errors::{Result, TangleError};

use super::label::FragmentLabel;
use super::registry::Registry;
use super::resolver::Resolution;

/// Cycle detector for preventing infinite expansion.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    /// Labels currently being expanded, outermost first.
    stack: Vec<FragmentLabel>,
    seen: HashSet<FragmentLabel>,
}

impl CycleDetector {
    /// Creates a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a fragment, failing if it is already being expanded.
    pub fn enter(&mut self, label: &FragmentLabel) -> Result<()> {
        if self.seen.contains(label) {
            let mut cycle: Vec<String> = self.stack.iter().map(|l| l.to_string()).collect();
            cycle.push(label.to_string());
            return Err(TangleError::CycleDetected(cycle));
        }
        self.seen.insert(label.clone());
        self.stack.push(label.clone());
        Ok(())
    }

    /// Leaves the innermost fragment.
    pub fn exit(&mut self) {
        if let Some(label) = self.stack.pop() {
            self.seen.remove(&label);
        }
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Unread remainder of one fragment being expanded.
#[derive(Debug)]
struct Frame<'a> {
    content: &'a str,
    offset: usize,
}

impl Frame<'_> {
    fn next_char(&mut self) -> Option<char> {
        let ch = self.content[self.offset..].chars().next()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }
}

/// Expands references in fragments of one registry.
///
/// The output is built as one working text: fragment content is streamed in
/// a character at a time, and a reference is cut out and replaced by its
/// target's content as soon as its close marker arrives. This equals
/// repeatedly substituting the leftmost reference until none remain, also
/// when a reference is assembled from text of more than one fragment.
///
/// A fragment stays on the frame stack until its content has been read and
/// the next character is requested, so a fragment referenced again before
/// that point is reported as a cycle.
pub struct Tangler<'a> {
    registry: &'a Registry,
    markers: &'a Markers,
    detector: CycleDetector,
    substitutions: usize,
}

impl<'a> Tangler<'a> {
    /// Creates a tangler over a fully built registry.
    pub fn new(registry: &'a Registry, markers: &'a Markers) -> Self {
        Self {
            registry,
            markers,
            detector: CycleDetector::new(),
            substitutions: 0,
        }
    }

    /// Expands the declared root fragment.
    pub fn tangle_root(&mut self) -> Result<String> {
        let registry: &'a Registry = self.registry;
        let root = registry.root().ok_or(TangleError::NoRoot)?;
        self.expand(root)
    }

    /// Expands the fragment `label` resolves to.
    pub fn tangle_label(&mut self, label: &str) -> Result<String> {
        let full = self.resolve(label)?;
        self.expand(full)
    }

    /// Number of references substituted so far.
    pub fn substitutions(&self) -> usize {
        self.substitutions
    }

    fn resolve(&self, label: &str) -> Result<&'a FragmentLabel> {
        let registry: &'a Registry = self.registry;
        match registry.resolve(label) {
            Resolution::Unique(full) => Ok(full),
            other => Err(TangleError::UnknownLabel {
                label: label.to_string(),
                candidates: other.candidates(),
            }),
        }
    }

    fn push_frame(&mut self, frames: &mut Vec<Frame<'a>>, full: &'a FragmentLabel) -> Result<()> {
        let registry: &'a Registry = self.registry;
        let content = registry
            .get(full.as_str())
            .map(|f| f.content())
            .ok_or_else(|| TangleError::UnknownLabel {
                label: full.to_string(),
                candidates: Vec::new(),
            })?;

        self.detector.enter(full)?;
        frames.push(Frame { content, offset: 0 });
        Ok(())
    }

    fn expand(&mut self, full: &'a FragmentLabel) -> Result<String> {
        // A failed run may leave labels behind
        self.detector = CycleDetector::new();

        let markers: &'a Markers = self.markers;
        let mut tracker = markers.tracker();
        let mut frames = Vec::new();
        let mut output = String::new();
        self.push_frame(&mut frames, full)?;

        while let Some(frame) = frames.last_mut() {
            let Some(ch) = frame.next_char() else {
                frames.pop();
                self.detector.exit();
                continue;
            };

            output.push(ch);
            let Some(reference) = tracker.push(&output, ch) else {
                continue;
            };
            let label = reference.label.to_string();
            let start = reference.start;
            output.truncate(start);

            let target = self.resolve(&label)?;
            tracing::debug!(
                "Expanding `{}` -> `{}` (depth {})",
                label,
                target,
                self.detector.depth()
            );
            self.substitutions += 1;
            self.push_frame(&mut frames, target)?;
        }

        Ok(output)
    }
}

/// Tangles the root fragment of `registry`.
pub fn tangle_root(registry: &Registry, markers: &Markers) -> Result<String> {
    Tangler::new(registry, markers).tangle_root()
}

/// Tangles the fragment `label` resolves to, ignoring the declared root.
pub fn tangle_label(registry: &Registry, markers: &Markers, label: &str) -> Result<String> {
    Tangler::new(registry, markers).tangle_label(label)
}
