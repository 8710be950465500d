//! Error types for mdtangle.

use thiserror::Error;

use crate::text_location::TextLocation;

/// Main error type for scanning, registry and tangle operations.
///
/// Every structural error is fatal: the run aborts and no output is written.
#[derive(Error, Debug)]
pub enum TangleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Parse error at {location}: {message}")]
    Parse {
        location: TextLocation,
        message: String,
    },

    #[error("Unclosed fragment block `{label}` opened at {location}")]
    UnclosedFence {
        label: String,
        location: TextLocation,
    },

    #[error("Duplicate root `{label}` at {location}: root already declared as `{previous}`")]
    DuplicateRoot {
        label: String,
        previous: String,
        location: TextLocation,
    },

    #[error("Fragment `{label}` initialized twice (second initialization at {location})")]
    DoubleInit {
        label: String,
        location: TextLocation,
    },

    #[error("Append to uninitialized fragment `{label}` at {location}")]
    UninitializedAppend {
        label: String,
        location: TextLocation,
    },

    #[error("Unknown label `{label}`{}", describe_candidates(.candidates))]
    UnknownLabel {
        label: String,
        /// Every full label the reference matched; empty when nothing matched.
        candidates: Vec<String>,
    },

    #[error("Ambiguous label `{label}` initialized at {location}{}", describe_candidates(.candidates))]
    AmbiguousInit {
        label: String,
        candidates: Vec<String>,
        location: TextLocation,
    },

    #[error("No root fragment declared")]
    NoRoot,

    #[error("Cycle detected in references: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),
}

fn describe_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        String::new()
    } else {
        format!(" (ambiguous between: {})", candidates.join(", "))
    }
}

/// Result type alias for mdtangle operations.
pub type Result<T> = std::result::Result<T, TangleError>;
