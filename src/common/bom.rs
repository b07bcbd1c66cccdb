//! Byte Order Mark (BOM) handling for XML inputs.
//!
//! Exports produced on Windows frequently start with a UTF-8 BOM, and a few
//! tools write UTF-16. Both are normalized to UTF-8 text before decoding.

use crate::common::{Error, Result};
use std::borrow::Cow;

/// Supported BOM encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomKind {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl BomKind {
    /// Returns the byte representation of the BOM.
    #[inline]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            BomKind::Utf8 => &UTF8_BOM,
            BomKind::Utf16Le => &UTF16_LE_BOM,
            BomKind::Utf16Be => &UTF16_BE_BOM,
        }
    }

    /// Returns the length in bytes of the BOM.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // No need to check for empty BOMs
    pub const fn len(&self) -> usize {
        self.as_bytes().len()
    }
}

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 little-endian BOM bytes.
pub const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-16 big-endian BOM bytes.
pub const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Detects a leading BOM in `bytes`.
pub fn detect_bom(bytes: &[u8]) -> Option<BomKind> {
    if bytes.starts_with(&UTF8_BOM) {
        Some(BomKind::Utf8)
    } else if bytes.starts_with(&UTF16_LE_BOM) {
        Some(BomKind::Utf16Le)
    } else if bytes.starts_with(&UTF16_BE_BOM) {
        Some(BomKind::Utf16Be)
    } else {
        None
    }
}

/// Converts raw document bytes into UTF-8 text.
///
/// Input without a BOM must already be valid UTF-8. Borrows when no
/// transcoding is needed.
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    match detect_bom(bytes) {
        Some(BomKind::Utf8) => Ok(Cow::Borrowed(std::str::from_utf8(
            &bytes[UTF8_BOM.len()..],
        )?)),
        Some(kind @ (BomKind::Utf16Le | BomKind::Utf16Be)) => {
            let encoding = if kind == BomKind::Utf16Le {
                encoding_rs::UTF_16LE
            } else {
                encoding_rs::UTF_16BE
            };
            encoding
                .decode_without_bom_handling_and_without_replacement(&bytes[kind.len()..])
                .ok_or_else(|| Error::Malformed(format!("invalid {} sequence", encoding.name())))
        },
        None => Ok(Cow::Borrowed(std::str::from_utf8(bytes)?)),
    }
}
