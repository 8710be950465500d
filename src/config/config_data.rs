//! Configuration data structures.

use serde::{Deserialize, Serialize};

use super::ambiguity_policy::AmbiguityPolicy;
use super::markers::Markers;
use crate::errors::{Result, TangleError};

/// Main configuration structure for mdtangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fence delimiter opening and closing fragment blocks.
    #[serde(default = "default_fence")]
    pub fence: String,

    /// Behavior of `=` on an ambiguous short label.
    #[serde(default)]
    pub ambiguous_init: AmbiguityPolicy,

    /// Markers wrapping fragment labels.
    #[serde(default)]
    pub markers: Markers,
}

fn default_fence() -> String {
    "```".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fence: default_fence(),
            ambiguous_init: AmbiguityPolicy::default(),
            markers: Markers::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects settings that cannot describe a document.
    pub fn validate(&self) -> Result<()> {
        self.markers.validate()?;
        if self.fence.trim().is_empty() {
            return Err(TangleError::Config("fence must not be empty".to_string()));
        }
        Ok(())
    }
}
