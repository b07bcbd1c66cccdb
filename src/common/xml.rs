//! Shared XML plumbing for the manifest and item document codecs.
//!
//! Documents are mapped onto serde "wire" structs through quick-xml; these
//! helpers cover the text-to-value conversions the wire layer leaves as
//! strings, so every failure can name the field it came from.

use crate::common::{Error, Result, bom};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Declaration written in front of every encoded document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Deserialize a whole document into a wire struct.
///
/// The root element name is not checked.
pub(crate) fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let text = bom::decode_text(bytes)?;
    Ok(quick_xml::de::from_str(&text)?)
}

/// Read a whole document file. The handle is closed on every exit path.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| Error::io(path, e))?;
    Ok(bytes)
}

/// Serialize a wire struct as a document rooted at `root`.
pub(crate) fn to_string<T: Serialize>(root: &str, value: &T) -> Result<String> {
    let body = quick_xml::se::to_string_with_root(root, value)?;
    let mut xml = String::with_capacity(XML_DECLARATION.len() + body.len() + 1);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&body);
    Ok(xml)
}

/// Parse integer text. Absent or blank text is zero.
pub(crate) fn parse_int(field: impl FnOnce() -> String, raw: Option<&str>) -> Result<i64> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(0);
    };
    text.parse::<i64>().map_err(|_| Error::TypeMismatch {
        field: field(),
        expected: "integer",
        value: text.to_string(),
    })
}

/// Parse a yes/no flag. Absent, blank and unrecognized text are `false`.
pub(crate) fn parse_flag(field: impl FnOnce() -> String, raw: Option<&str>) -> bool {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return false;
    };
    if ["yes", "true", "1"].iter().any(|t| text.eq_ignore_ascii_case(t)) {
        true
    } else {
        if !["no", "false", "0"].iter().any(|t| text.eq_ignore_ascii_case(t)) {
            tracing::warn!(field = %field(), value = text, "unrecognized flag, reading as false");
        }
        false
    }
}

/// Flag spelling used by question-pool exports.
#[inline]
pub(crate) fn format_flag(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// One piece of an element body: a run of character data or a child element.
///
/// Reading a body as a list of parts keeps the direct text of elements with
/// mixed content (`Intro <b>bold</b> end`) and skips the children.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) enum TextPart {
    #[serde(rename = "$text")]
    Text(String),
    #[serde(other)]
    Element,
}

/// Concatenate the character data of a body.
pub(crate) fn join_text(parts: Vec<TextPart>) -> String {
    let mut parts = parts.into_iter().filter_map(|part| match part {
        TextPart::Text(text) => Some(text),
        TextPart::Element => None,
    });
    let mut text = parts.next().unwrap_or_default();
    text.extend(parts);
    text
}

/// Body holding `value`; empty text writes no content.
pub(crate) fn text_parts(value: &str) -> Vec<TextPart> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![TextPart::Text(value.to_string())]
    }
}

/// A text-only element such as `<qticomment>`. Attributes are ignored.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct WireText {
    #[serde(rename = "$value")]
    parts: Vec<TextPart>,
}

impl WireText {
    pub(crate) fn into_string(self) -> String {
        join_text(self.parts)
    }
}

/// Text of the last occurrence of a repeated text element.
pub(crate) fn last_text(values: Vec<WireText>) -> Option<String> {
    values.into_iter().last().map(WireText::into_string)
}

/// Zero or one text element, so empty fields are left out when encoding.
pub(crate) fn text_element(value: &str) -> Vec<WireText> {
    if value.is_empty() {
        Vec::new()
    } else {
        vec![WireText {
            parts: text_parts(value),
        }]
    }
}
