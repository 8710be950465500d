//! High-level interface for tangling documents.

mod document;

pub use document::{tangle_str, Document};
