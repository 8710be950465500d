//! Handling of ambiguous short labels during initialization.

use serde::{Deserialize, Deserializer, Serialize};

/// What `«label»=` does when `label` is a prefix of several full labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Treat the ambiguous text as a brand-new full label.
    /// Also accepted as "compat".
    #[default]
    NewLabel,

    /// Fail with an ambiguity error.
    /// Also accepted as "strict".
    Error,
}

impl<'de> Deserialize<'de> for AmbiguityPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().as_str() {
            "new-label" | "compat" => Ok(AmbiguityPolicy::NewLabel),
            "error" | "strict" => Ok(AmbiguityPolicy::Error),
            _ => Err(serde::de::Error::custom(format!(
                "unknown ambiguous_init: '{}' (expected 'new-label', 'compat', 'error', or 'strict')",
                s
            ))),
        }
    }
}
