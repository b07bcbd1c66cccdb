//! Unified error types for quizpack.
//!
//! Package resolution and document decoding share one error type so a caller
//! can surface any failure verbatim, or match on its [`ErrorKind`].

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, Result};
