//! Question body: material and the response construct.

/// MIME type of plain text material.
pub const TEXT_PLAIN: &str = "text/plain";
/// MIME type of rich (XHTML) text material.
pub const TEXT_XHTML: &str = "text/xhtml";

/// Kind of text carried by a `mattext` element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextType {
    #[default]
    Plain,
    RichText,
}

impl TextType {
    /// Map a `texttype` attribute value. Unknown types are treated as plain.
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim() {
            TEXT_XHTML | "text/html" => TextType::RichText,
            _ => TextType::Plain,
        }
    }

    /// The `texttype` attribute value written when encoding.
    pub const fn as_mime(&self) -> &'static str {
        match self {
            TextType::Plain => TEXT_PLAIN,
            TextType::RichText => TEXT_XHTML,
        }
    }
}

/// Text slot of a material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialText {
    pub text_type: TextType,
    pub value: String,
}

/// Image slot of a material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialImage {
    pub label: String,
    pub uri: String,
}

/// Displayable content. Text and image are independent; both may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Material {
    pub text: Option<MaterialText>,
    pub image: Option<MaterialImage>,
}

impl Material {
    /// Plain text material.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            text: Some(MaterialText {
                text_type: TextType::Plain,
                value: value.into(),
            }),
            image: None,
        }
    }

    /// Text value, or `""` when the material has no text.
    pub fn text_value(&self) -> &str {
        self.text.as_ref().map_or("", |t| t.value.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none()
    }
}

/// One selectable answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    /// Token referenced by scoring conditions
    pub ident: i64,
    pub material: Material,
}

/// Choice-based response construct (`response_lid`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseChoice {
    pub ident: String,
    /// Passed through as written, e.g. `Single` or `Multiple`
    pub cardinality: String,
    pub shuffle: bool,
    pub choices: Vec<Choice>,
}

impl ResponseChoice {
    /// Find a choice by its ident.
    pub fn choice(&self, ident: i64) -> Option<&Choice> {
        self.choices.iter().find(|c| c.ident == ident)
    }
}

/// Material followed by the response construct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flow {
    pub material: Material,
    pub response: ResponseChoice,
}

/// The question body shown to the respondent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub label: String,
    pub flow: Flow,
}
