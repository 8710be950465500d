//! Building a fragment registry from a document.

use std::path::Path;

use crate::config::Config;
use crate::errors::Result;
use crate::model::Registry;

use super::scanner::{scan, Operator};

/// Scans `text` and feeds every fragment block into a new registry, in document order.
///
/// Stops at the first scanning or registry error.
pub fn read_document(text: &str, source: Option<&Path>, config: &Config) -> Result<Registry> {
    let mut registry = Registry::with_policy(config.ambiguous_init);

    for block in scan(text, config)?.with_source(source) {
        let block = block?;
        match block.operator {
            Operator::Root => registry.declare_root(block.label, block.location)?,
            Operator::Initialize => {
                registry.initialize(block.label, block.content, block.location)?
            }
            Operator::Append => registry.append(block.label, block.content, block.location)?,
        }
    }

    tracing::debug!(
        "Read {} fragments (root: {})",
        registry.len(),
        registry.root().map_or("<none>", |r| r.as_str())
    );
    Ok(registry)
}

/// Reads a document file and builds its registry.
pub fn read_document_file(path: &Path, config: &Config) -> Result<Registry> {
    let content = std::fs::read_to_string(path)?;
    read_document(&content, Some(path), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AmbiguityPolicy;
    use crate::errors::TangleError;
    use std::fs;
    use tempfile::tempdir;

    fn read(text: &str) -> Result<Registry> {
        read_document(text, None, &Config::default())
    }

    #[test]
    fn test_build_registry() {
        let doc = r#"# Greeting

```
«Greeting program»
```

The program prints a greeting.

```python
«Greeting»=
«Imports»
print("hi")
```

```python
«Imports»=
import sys
```

```python
«Imp»+=
import os
```
"#;
        let reg = read(doc).unwrap();

        assert_eq!(reg.root().unwrap().as_str(), "Greeting program");
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.lookup("Greeting").unwrap(), "«Imports»\nprint(\"hi\")");
        assert_eq!(reg.lookup("Imports").unwrap(), "import sysimport os");
    }

    #[test]
    fn test_duplicate_root() {
        let err = read("```\n«A»\n```\n```\n«B»\n```\n").unwrap_err();
        match err {
            TangleError::DuplicateRoot { location, .. } => assert_eq!(location.line, 5),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_double_init() {
        let err = read("```\n«A»=\nx\n```\n```\n«A»=\ny\n```\n").unwrap_err();
        assert!(matches!(err, TangleError::DoubleInit { .. }));
    }

    #[test]
    fn test_append_before_init() {
        let err = read("```\n«A»+=\nx\n```\n```\n«A»=\ny\n```\n").unwrap_err();
        assert!(matches!(err, TangleError::UninitializedAppend { ref label, .. } if label == "A"));
    }

    #[test]
    fn test_strict_ambiguous_init() {
        let config = Config {
            ambiguous_init: AmbiguityPolicy::Error,
            ..Config::default()
        };
        let doc = "```\n«ab»=\n1\n```\n```\n«ac»=\n2\n```\n```\n«a»=\n3\n```\n";
        let err = read_document(doc, None, &config).unwrap_err();
        assert!(matches!(err, TangleError::AmbiguousInit { .. }));

        assert_eq!(read(doc).unwrap().len(), 3);
    }

    #[test]
    fn test_errors_carry_file_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "```\n«A»+=\nx\n```\n").unwrap();

        let err = read_document_file(&path, &Config::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("doc.md:2:1"), "{message}");
        assert!(message.contains("`A`"), "{message}");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_document_file(&dir.path().join("absent.md"), &Config::default());
        assert!(matches!(result, Err(TangleError::Io(_))));
    }
}
