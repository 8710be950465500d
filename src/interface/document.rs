//! A parsed literate document, ready to tangle.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::Result;
use crate::model::{tangle_label, tangle_root, Registry};
use crate::readers::read_document;

/// A document whose fragments have been collected.
#[derive(Debug, Clone)]
pub struct Document {
    /// Path of the source document, `None` for standard input.
    pub path: Option<PathBuf>,
    /// Fragments defined by the document.
    pub registry: Registry,
    config: Config,
}

impl Document {
    /// Parses document text.
    pub fn parse(text: &str, path: Option<&Path>, config: &Config) -> Result<Self> {
        let registry = read_document(text, path, config)?;
        Ok(Self {
            path: path.map(Path::to_path_buf),
            registry,
            config: config.clone(),
        })
    }

    /// Loads and parses a document file.
    pub fn load(path: &Path, config: &Config) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, Some(path), config)
    }

    /// Expands the root fragment into program text.
    pub fn tangle(&self) -> Result<String> {
        tangle_root(&self.registry, &self.config.markers)
    }

    /// Expands the fragment `label` resolves to instead of the root.
    pub fn tangle_fragment(&self, label: &str) -> Result<String> {
        tangle_label(&self.registry, &self.config.markers, label)
    }

    /// Lists full labels in definition order, flagging the root.
    pub fn outline(&self) -> Vec<(String, bool)> {
        let root = self.registry.root();
        self.registry
            .labels()
            .map(|label| (label.to_string(), Some(label) == root))
            .collect()
    }
}

/// Parses and tangles document text in one step.
pub fn tangle_str(text: &str, config: &Config) -> Result<String> {
    Document::parse(text, None, config)?.tangle()
}
