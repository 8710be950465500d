//! Readers for extracting fragment blocks from documents.

mod document;
mod scanner;

pub use document::{read_document, read_document_file};
pub use scanner::{scan, Operator, Scanner, TaggedBlock};
