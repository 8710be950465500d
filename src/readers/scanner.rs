//! Scanning documents for fenced fragment blocks.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::Config;
use crate::errors::{Result, TangleError};
use crate::text_location::TextLocation;

/// What a fragment block does with its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// No operator: the label names the root fragment.
    Root,
    /// `=`: first content of a fragment.
    Initialize,
    /// `+=`: more content for an existing fragment.
    Append,
}

impl Operator {
    /// Parses the token following a label line's closing marker.
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        match token {
            None | Some("") => Some(Self::Root),
            Some("=") => Some(Self::Initialize),
            Some("+=") => Some(Self::Append),
            Some(_) => None,
        }
    }

    /// The operator as written in a document.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Root => "",
            Self::Initialize => "=",
            Self::Append => "+=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One fragment block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedBlock<'a> {
    /// Label text, whitespace trimmed.
    pub label: &'a str,
    pub operator: Operator,
    /// Text between the label line and the closing fence, without the final
    /// line break. Unused for root declarations.
    pub content: &'a str,
    /// Location of the label line.
    pub location: TextLocation,
}

/// A single line of the document, as byte offsets.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    start: usize,
    /// Line text without `\n` and without a trailing `\r`.
    text: &'a str,
}

/// Iterator over the fragment blocks of a document, in document order.
///
/// Fenced blocks whose first line is not a label line are skipped through
/// their closing fence. The scanner stops after the first error. A clone taken
/// before iterating replays the same blocks independently.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    line_number: usize,
    fence: String,
    label_line: Regex,
    source: Option<PathBuf>,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `text` using the configured fence and markers.
    pub fn new(text: &'a str, config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            text,
            pos: 0,
            line_number: 1,
            fence: config.fence.clone(),
            label_line: config.markers.label_line_pattern()?,
            source: None,
            done: false,
        })
    }

    /// Records the document path in every reported location.
    pub fn with_source(mut self, source: Option<&Path>) -> Self {
        self.source = source.map(Path::to_path_buf);
        self
    }

    fn location(&self, line: usize) -> TextLocation {
        TextLocation::at_line(line).within(self.source.as_deref())
    }

    fn next_line(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        let rest = &self.text[start..];
        let (raw, advance) = match rest.find('\n') {
            Some(i) => (&rest[..i], i + 1),
            None => (rest, rest.len()),
        };
        self.pos += advance;

        let number = self.line_number;
        self.line_number += 1;

        Some(Line {
            number,
            start,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        })
    }

    fn is_open_fence(&self, line: &Line<'_>) -> bool {
        line.text.starts_with(self.fence.as_str())
    }

    fn is_close_fence(&self, line: &Line<'_>) -> bool {
        line.text == self.fence
    }

    /// Consumes an ordinary code block through its closing fence.
    fn skip_block(&mut self, opened_at: usize) {
        while let Some(line) = self.next_line() {
            if self.is_close_fence(&line) {
                return;
            }
        }
        tracing::warn!(
            "Unclosed code block opened at {}",
            self.location(opened_at)
        );
    }

    /// Reads fragment content up to the closing fence.
    fn read_content(&mut self, label: &'a str, label_line: usize) -> Result<&'a str> {
        let content_start = self.pos;
        while let Some(line) = self.next_line() {
            if self.is_close_fence(&line) {
                if line.start <= content_start {
                    return Ok("");
                }
                let body = &self.text[content_start..line.start];
                let body = body.strip_suffix('\n').unwrap_or(body);
                return Ok(body.strip_suffix('\r').unwrap_or(body));
            }
        }
        Err(TangleError::UnclosedFence {
            label: label.to_string(),
            location: self.location(label_line),
        })
    }

    fn scan_next(&mut self) -> Option<Result<TaggedBlock<'a>>> {
        loop {
            let open = self.next_line()?;
            if !self.is_open_fence(&open) {
                continue;
            }

            let Some(first) = self.next_line() else {
                tracing::warn!(
                    "Unclosed code block opened at {}",
                    self.location(open.number)
                );
                return None;
            };

            let Some(caps) = self.label_line.captures(first.text) else {
                if !self.is_close_fence(&first) {
                    self.skip_block(open.number);
                }
                continue;
            };

            let label = caps.name("label").map_or("", |m| m.as_str()).trim();
            let location = self.location(first.number);
            if label.is_empty() {
                return Some(Err(TangleError::Parse {
                    location,
                    message: "empty fragment label".to_string(),
                }));
            }

            let token = caps.name("op").map(|m| m.as_str());
            let Some(operator) = Operator::from_token(token) else {
                return Some(Err(TangleError::Parse {
                    location,
                    message: format!(
                        "unknown operator `{}` after label `{}`",
                        token.unwrap_or_default(),
                        label
                    ),
                }));
            };

            return Some(self.read_content(label, first.number).map(|content| TaggedBlock {
                label,
                operator,
                content,
                location,
            }));
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<TaggedBlock<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.scan_next();
        match &item {
            None | Some(Err(_)) => self.done = true,
            Some(Ok(_)) => {}
        }
        item
    }
}

/// Scans `text` for fragment blocks.
pub fn scan<'a>(text: &'a str, config: &Config) -> Result<Scanner<'a>> {
    Scanner::new(text, config)
}
