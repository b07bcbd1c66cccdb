//! Error taxonomy for package resolution and document decoding.
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for quizpack operations.
///
/// Every failure aborts the whole operation; there is no partial result.
#[derive(Error, Debug)]
pub enum Error {
    /// Package root is missing or is not a directory
    #[error("Package folder not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// No file name in the package folder matched the manifest pattern
    #[error("Manifest (qpl) file not found in {}", dir.display())]
    ManifestNotFound { dir: PathBuf },

    /// No file name in the package folder matched the item document pattern
    #[error("Assessment (qti) file not found in {}", dir.display())]
    AssessmentNotFound { dir: PathBuf },

    /// XML syntax, encoding or structure error
    #[error("Malformed XML: {0}")]
    Malformed(String),

    /// Text of an integer or flag field could not be parsed
    #[error("Type mismatch in {field}: expected {expected}, got {value:?}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// Open or read failure other than a missing package root
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serializing a model value back to XML failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// A decode error raised while reading a specific file
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Coarse failure category, stable for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    ManifestNotFound,
    AssessmentNotFound,
    Malformed,
    TypeMismatch,
    Io,
    Encode,
}

impl Error {
    /// Category of this error. File context is looked through.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::ManifestNotFound { .. } => ErrorKind::ManifestNotFound,
            Error::AssessmentNotFound { .. } => ErrorKind::AssessmentNotFound,
            Error::Malformed(_) => ErrorKind::Malformed,
            Error::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Error::Io { .. } => ErrorKind::Io,
            Error::Encode(_) => ErrorKind::Encode,
            Error::InFile { source, .. } => source.kind(),
        }
    }

    /// Attach the path of the file being decoded.
    pub(crate) fn in_file(self, path: &Path) -> Self {
        Error::InFile {
            path: path.to_path_buf(),
            source: Box::new(self),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for quizpack operations.
pub type Result<T> = std::result::Result<T, Error>;
