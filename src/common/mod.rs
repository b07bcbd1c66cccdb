//! Common types and utilities shared by the manifest and item document codecs.

// Submodule declarations
pub mod bom;
pub mod error;
pub(crate) mod xml;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use xml::XML_DECLARATION;
