//! mdtangle - extract program text from literate markdown documents
//!
//! A document interleaves prose with fenced fragment blocks. The first line of
//! each block names a fragment between `«` and `»` markers, optionally followed
//! by `=` (initialize) or `+=` (append); a label with no operator names the
//! root. Fragment bodies may reference other fragments as `«label»`, using any
//! unambiguous prefix of the full label.
//!
//! Tangling builds a [`Registry`] from the blocks in document order, then
//! expands the root by substituting references until none remain.
//!
//! # Example
//!
//! ```
//! use mdtangle::{tangle_str, Config};
//!
//! let doc = "```\n«Program»\n```\n\n```python\n«Program»=\n«Greeting»\n```\n\n```python\n«Greeting»=\nprint(\"hi\")\n```\n";
//! assert_eq!(tangle_str(doc, &Config::default()).unwrap(), "print(\"hi\")");
//! ```

pub mod config;
pub mod errors;
pub mod interface;
pub mod model;
pub mod readers;
pub mod text_location;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use errors::{Result, TangleError};
pub use interface::{tangle_str, Document};
pub use model::{Fragment, FragmentLabel, Registry};
