//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from parser
//! error types to the unified Error type.

use super::types::Error;

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::Malformed(err.to_string())
    }
}

impl From<quick_xml::SeError> for Error {
    fn from(err: quick_xml::SeError) -> Self {
        Error::Encode(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Malformed(format!("invalid UTF-8: {}", err))
    }
}
