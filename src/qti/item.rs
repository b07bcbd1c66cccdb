//! Items and the assessment document.

use super::presentation::{Flow, Presentation};
use super::processing::ResponseProcessing;
use crate::common::Result;

/// Opaque key/value pair from `qtimetadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataField {
    pub label: String,
    pub entry: String,
}

/// Hint index and the points it costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionHint {
    pub index: i64,
    pub points: i64,
}

/// Feedback shown when a rule links to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFeedback {
    pub ident: String,
    pub view: String,
    pub flow: Flow,
}

/// One gradable question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    /// Key within the document; uniqueness is not checked
    pub ident: String,
    pub title: String,
    pub max_attempts: i64,
    pub comment: String,
    /// Duration token, kept as written
    pub duration: String,
    /// Metadata entries in document order; duplicate labels are kept
    pub metadata_fields: Vec<MetadataField>,
    pub presentation: Presentation,
    pub response_processing: ResponseProcessing,
    pub feedbacks: Vec<ItemFeedback>,
    pub solution_hint: Option<SolutionHint>,
}

impl Item {
    /// Resolve a feedback link target.
    pub fn feedback(&self, ref_id: &str) -> Option<&ItemFeedback> {
        self.feedbacks.iter().find(|f| f.ident == ref_id)
    }

    /// All metadata entries carrying `label`.
    pub fn metadata(&self, label: &str) -> impl Iterator<Item = &str> {
        self.metadata_fields
            .iter()
            .filter(move |f| f.label == label)
            .map(|f| f.entry.as_str())
    }
}

/// The QTI item document. Item order is presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentDocument {
    pub items: Vec<Item>,
}

impl AssessmentDocument {
    /// Parse an item document from XML text.
    pub fn from_xml(xml: &str) -> Result<Self> {
        super::decode_assessment(xml.as_bytes())
    }

    /// Serialize this document to XML text.
    pub fn to_xml(&self) -> Result<String> {
        super::encode_assessment(self)
    }

    /// First item with the given ident.
    pub fn item(&self, ident: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.ident == ident)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a AssessmentDocument {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
