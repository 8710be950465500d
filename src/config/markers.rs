//! Bracket markers delimiting fragment labels.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, TangleError};

/// The pair of markers wrapping a label, both on label lines and in references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Marker opening a label.
    #[serde(default = "default_open")]
    pub open: String,

    /// Marker closing a label.
    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    "«".to_string()
}

fn default_close() -> String {
    "»".to_string()
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

/// A bracketed reference located inside fragment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Byte offset of the open marker.
    pub start: usize,
    /// Byte offset just past the close marker.
    pub end: usize,
    /// Label text between the markers, whitespace trimmed.
    pub label: &'a str,
}

impl Markers {
    /// Creates a new marker pair.
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    /// Checks that the markers can delimit anything at all.
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(TangleError::Config(
                "label markers must not be empty".to_string(),
            ));
        }
        if self.open == self.close {
            return Err(TangleError::Config(format!(
                "open and close markers must differ (both are `{}`)",
                self.open
            )));
        }
        if self.open.contains('\n') || self.close.contains('\n') {
            return Err(TangleError::Config(
                "label markers must not contain newlines".to_string(),
            ));
        }
        Ok(())
    }

    /// Formats a label wrapped in the markers.
    pub fn wrap(&self, label: &str) -> String {
        format!("{}{}{}", self.open, label, self.close)
    }

    /// Builds the pattern for a label line: a wrapped label, then an optional
    /// operator token ending in `=`. Tokens other than `=` and `+=` are left
    /// for the scanner to reject.
    pub fn label_line_pattern(&self) -> Result<Regex> {
        let pattern = format!(
            r"^{}(?P<label>.*?){}[ \t]*(?P<op>[^\s\w]*=)?[ \t]*$",
            regex::escape(&self.open),
            regex::escape(&self.close)
        );
        Regex::new(&pattern).map_err(|e| TangleError::Config(e.to_string()))
    }

    /// Starts tracking references in a text that grows one character at a time.
    pub fn tracker(&self) -> ReferenceTracker<'_> {
        ReferenceTracker {
            markers: self,
            opens: Vec::new(),
        }
    }
}

/// Finds references at the end of a growing text.
///
/// A reference is the nearest open/close pair on one line: its label holds
/// neither marker nor a newline. Unpaired markers are literal text. Open
/// markers stay pending after a reference is cut out in front of them, so a
/// pair can form from text pushed before and after the cut.
#[derive(Debug, Clone)]
pub struct ReferenceTracker<'m> {
    markers: &'m Markers,
    /// Byte offsets of open markers not yet closed on the current line.
    opens: Vec<usize>,
}

impl ReferenceTracker<'_> {
    /// Inspects the end of `text` after `ch` was appended to it.
    ///
    /// Returns the reference `ch` completes, if any. The caller is expected to
    /// truncate `text` to the reference start before pushing more.
    pub fn push<'t>(&mut self, text: &'t str, ch: char) -> Option<Reference<'t>> {
        if ch == '\n' {
            self.opens.clear();
            return None;
        }

        let open = &self.markers.open;
        let close = &self.markers.close;
        if text.ends_with(close.as_str()) {
            let close_at = text.len() - close.len();
            if let Some(&start) = self.opens.last() {
                if start + open.len() <= close_at {
                    self.opens.pop();
                    return Some(Reference {
                        start,
                        end: text.len(),
                        label: text[start + open.len()..close_at].trim(),
                    });
                }
            }
        }
        if text.ends_with(open.as_str()) {
            self.opens.push(text.len() - open.len());
        }
        None
    }
}
