//! Element and attribute mapping for the manifest document.

use super::manifest::{Identifier, LocalizedText, ManifestMetadata};
use crate::common::xml::{TextPart, join_text, text_parts};
use serde::{Deserialize, Serialize};

/// Root element name written when encoding.
pub(super) const ROOT: &str = "ContentObject";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub(super) struct WireContentObject {
    #[serde(rename = "@Type")]
    content_type: String,
    #[serde(rename = "MetaData")]
    meta_data: Vec<WireMetaData>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireMetaData {
    #[serde(rename = "General")]
    general: Vec<WireGeneral>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireGeneral {
    #[serde(rename = "@Structure")]
    structure: String,
    #[serde(rename = "Identifier")]
    identifier: Vec<WireIdentifier>,
    #[serde(rename = "Title")]
    title: Vec<WireLocalized>,
    #[serde(rename = "Language")]
    language: Vec<WireLocalized>,
    #[serde(rename = "Description")]
    description: Vec<WireLocalized>,
    #[serde(rename = "Keyword")]
    keyword: Vec<WireLocalized>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireIdentifier {
    #[serde(rename = "@Catalog")]
    catalog: String,
    #[serde(rename = "@Entry")]
    entry: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireLocalized {
    #[serde(rename = "@Language")]
    language: String,
    #[serde(rename = "$value")]
    text: Vec<TextPart>,
}

/// First occurrence wins; later language variants are dropped.
fn first_localized(values: Vec<WireLocalized>) -> LocalizedText {
    values
        .into_iter()
        .next()
        .map(|v| LocalizedText {
            language_tag: v.language,
            text: join_text(v.text),
        })
        .unwrap_or_default()
}

fn localized(value: &LocalizedText) -> Vec<WireLocalized> {
    vec![WireLocalized {
        language: value.language_tag.clone(),
        text: text_parts(&value.text),
    }]
}

impl From<WireContentObject> for ManifestMetadata {
    fn from(wire: WireContentObject) -> Self {
        // A repeated `MetaData` or `General` block replaces the earlier one.
        let general = wire
            .meta_data
            .into_iter()
            .last()
            .and_then(|m| m.general.into_iter().last())
            .unwrap_or_default();
        let identifier = general
            .identifier
            .into_iter()
            .next()
            .map(|id| Identifier {
                catalog: id.catalog,
                entry: id.entry,
            })
            .unwrap_or_default();

        ManifestMetadata {
            content_type: wire.content_type,
            structure: general.structure,
            identifier,
            title: first_localized(general.title),
            language: first_localized(general.language),
            description: first_localized(general.description),
            keyword: first_localized(general.keyword),
        }
    }
}

impl From<&ManifestMetadata> for WireContentObject {
    fn from(manifest: &ManifestMetadata) -> Self {
        WireContentObject {
            content_type: manifest.content_type.clone(),
            meta_data: vec![WireMetaData {
                general: vec![WireGeneral {
                    structure: manifest.structure.clone(),
                    identifier: vec![WireIdentifier {
                        catalog: manifest.identifier.catalog.clone(),
                        entry: manifest.identifier.entry.clone(),
                    }],
                    title: localized(&manifest.title),
                    language: localized(&manifest.language),
                    description: localized(&manifest.description),
                    keyword: localized(&manifest.keyword),
                }],
            }],
        }
    }
}
