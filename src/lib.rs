//! Quizpack - A Rust library for reading exported question-pool packages
//!
//! A question-pool export is a folder holding two paired XML documents: a
//! package manifest (the "QPL" file) and a question/test interoperability
//! document (the "QTI" file) with the items themselves, their presentation,
//! scoring rules and feedback.
//!
//! # Features
//!
//! - **Package Locator**: Find both documents in an export folder, looking
//!   through one wrapper folder left by some export tools
//! - **Manifest Decoder**: Package type, identifier and localized metadata
//! - **Item Decoder**: Question text, choices, scoring rules with negated
//!   conditions, feedback links and solution hints
//! - **Encoders**: Write a model value back to XML with the same mapping
//!
//! # Example - Opening a package folder
//!
//! ```no_run
//! use quizpack::Package;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let package = Package::open("exports/1700000000__0__qpl_7")?;
//! println!("Pool: {}", package.manifest.title.text);
//!
//! for item in &package.assessment {
//!     println!("{} ({} attempts)", item.title, item.max_attempts);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Decoding documents directly
//!
//! ```no_run
//! use quizpack::{qpl, qti};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = qpl::decode_manifest(&std::fs::read("pool_qpl.xml")?)?;
//! let document = qti::decode_assessment(&std::fs::read("pool_qti.xml")?)?;
//! println!("{} has {} items", manifest.identifier.entry, document.len());
//! # Ok(())
//! # }
//! ```

/// Common types and utilities
///
/// This module provides the unified error type and the XML plumbing shared by
/// both decoders.
pub mod common;

/// QPL manifest model and codec
pub mod qpl;

/// QTI item document model and codec
pub mod qti;

/// Package folder resolution
///
/// This module locates the manifest and item document inside an export
/// folder and combines the decoded results.
pub mod package;

// Re-export commonly used types for convenience
pub use common::{Error, ErrorKind, Result};
pub use package::{Locator, LocatorOptions, Package, PackagePaths, locate_package};
pub use qpl::{ManifestMetadata, decode_manifest};
pub use qti::{AssessmentDocument, Item, decode_assessment};
