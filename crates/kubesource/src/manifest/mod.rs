//! Rendered manifest handling: multi-document parsing and identity extraction.

pub mod document;
pub mod identity;
pub mod parser;

pub use document::{Document, ParsedDocument};
pub use identity::Identity;
pub use parser::parse_documents;
