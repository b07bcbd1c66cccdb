//! Package manifest model.

use crate::common::Result;

/// A string tagged with the language it is written in.
///
/// Only one language variant is kept per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedText {
    /// Language tag, e.g. `en` or `de`
    pub language_tag: String,
    /// Text content
    pub text: String,
}

impl LocalizedText {
    /// Create localized text.
    pub fn new(language_tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language_tag: language_tag.into(),
            text: text.into(),
        }
    }

    /// True when neither language nor text is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.language_tag.is_empty() && self.text.is_empty()
    }
}

/// Composite external key of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub catalog: String,
    pub entry: String,
}

/// Package-level metadata from the QPL manifest file.
///
/// A manifest always carries exactly one identifier; the localized fields are
/// empty when the document leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestMetadata {
    /// Package type discriminator (`Type` attribute of the root element)
    pub content_type: String,
    /// `Structure` attribute of the `General` block
    pub structure: String,
    pub identifier: Identifier,
    pub title: LocalizedText,
    pub language: LocalizedText,
    pub description: LocalizedText,
    pub keyword: LocalizedText,
}

impl ManifestMetadata {
    /// Parse a manifest from XML text.
    pub fn from_xml(xml: &str) -> Result<Self> {
        super::decode_manifest(xml.as_bytes())
    }

    /// Serialize this manifest to XML text.
    pub fn to_xml(&self) -> Result<String> {
        super::encode_manifest(self)
    }
}
