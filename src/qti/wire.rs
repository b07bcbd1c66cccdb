//! Element and attribute mapping for the QTI item document.
//!
//! The wire structs mirror the document grammar one-to-one and keep every
//! scalar as text. Conversion into the public model parses integers and flags
//! so a bad value can be reported with the path of the field that held it.
//!
//! A few values appear in exports either as attributes or as child elements
//! (`itemfeedback` ident/view, `matimage` label/uri, `displayfeedback`
//! type/link). Both forms are read, the attribute wins, and encoding always
//! writes the attribute.

use super::item::{AssessmentDocument, Item, ItemFeedback, MetadataField, SolutionHint};
use super::presentation::{
    Choice, Flow, Material, MaterialImage, MaterialText, Presentation, ResponseChoice, TextType,
};
use super::processing::{
    Action, Condition, FeedbackLink, ResponseProcessing, ResponseRule, VarEqual,
};
use crate::common::Result;
use crate::common::xml::{
    TextPart, WireText, format_flag, join_text, last_text, parse_flag, parse_int, text_element,
    text_parts,
};
use serde::{Deserialize, Serialize};

/// Root element name written when encoding.
pub(super) const ROOT: &str = "questestinterop";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub(super) struct WireQuestestInterop {
    #[serde(rename = "item", skip_serializing_if = "Vec::is_empty")]
    items: Vec<WireItem>,
}

// Single-valued elements are read as lists so a repeated element does not
// fail the document; the last occurrence is used.

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireItem {
    #[serde(rename = "@ident")]
    ident: String,
    #[serde(rename = "@title")]
    title: String,
    #[serde(rename = "@maxattempts", skip_serializing_if = "Option::is_none")]
    max_attempts: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    qticomment: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    duration: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    itemmetadata: Vec<WireItemMetadata>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    presentation: Vec<WirePresentation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resprocessing: Vec<WireResProcessing>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    itemfeedback: Vec<WireItemFeedback>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    solutionhint: Vec<WireSolutionHint>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireItemMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    qtimetadata: Vec<WireQtiMetadata>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireQtiMetadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    qtimetadatafield: Vec<WireMetadataField>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireMetadataField {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fieldlabel: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fieldentry: Vec<WireText>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WirePresentation {
    #[serde(rename = "@label")]
    label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flow: Vec<WireFlow>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireFlow {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    material: Vec<WireMaterial>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    response_lid: Vec<WireResponseLid>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireFlowMat {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    material: Vec<WireMaterial>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireMaterial {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    mattext: Vec<WireMatText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    matimage: Vec<WireMatImage>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireMatText {
    #[serde(rename = "@texttype", skip_serializing_if = "Option::is_none")]
    text_type: Option<String>,
    #[serde(rename = "$value")]
    body: Vec<TextPart>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireMatImage {
    #[serde(rename = "@label", skip_serializing_if = "Option::is_none")]
    label_attr: Option<String>,
    #[serde(rename = "@uri", skip_serializing_if = "Option::is_none")]
    uri_attr: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    label: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    uri: Vec<WireText>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireResponseLid {
    #[serde(rename = "@ident")]
    ident: String,
    #[serde(rename = "@rcardinality")]
    cardinality: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    render_choice: Vec<WireRenderChoice>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireRenderChoice {
    #[serde(rename = "@shuffle", skip_serializing_if = "Option::is_none")]
    shuffle: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    response_label: Vec<WireResponseLabel>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireResponseLabel {
    #[serde(rename = "@ident", skip_serializing_if = "Option::is_none")]
    ident: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    material: Vec<WireMaterial>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireResProcessing {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    outcomes: Vec<WireOutcomes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    respcondition: Vec<WireRespCondition>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireOutcomes {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decvar: Vec<WireText>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireRespCondition {
    #[serde(rename = "@continue", skip_serializing_if = "Option::is_none")]
    continue_flag: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    conditionvar: Vec<WireConditionVar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    setvar: Vec<WireSetVar>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    displayfeedback: Vec<WireDisplayFeedback>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireConditionVar {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    varequal: Vec<WireVarEqual>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    not: Vec<WireNot>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireNot {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    varequal: Vec<WireVarEqual>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireVarEqual {
    #[serde(rename = "@respident")]
    respident: String,
    #[serde(rename = "$value")]
    body: Vec<TextPart>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireSetVar {
    #[serde(rename = "@action")]
    action: String,
    #[serde(rename = "$value")]
    body: Vec<TextPart>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireDisplayFeedback {
    #[serde(rename = "@feedbacktype", skip_serializing_if = "Option::is_none")]
    feedback_type_attr: Option<String>,
    #[serde(rename = "@linkrefid", skip_serializing_if = "Option::is_none")]
    link_ref_id_attr: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    feedbacktype: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    linkrefid: Vec<WireText>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireItemFeedback {
    #[serde(rename = "@ident", skip_serializing_if = "Option::is_none")]
    ident_attr: Option<String>,
    #[serde(rename = "@view", skip_serializing_if = "Option::is_none")]
    view_attr: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ident: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    view: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flow_mat: Vec<WireFlowMat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct WireSolutionHint {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    index: Vec<WireText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    points: Vec<WireText>,
}

//================================================================================================
// Decoding
//================================================================================================

/// Attribute form first, then the child element form.
#[inline]
fn attr_or_element(attr: Option<String>, element: Vec<WireText>) -> String {
    attr.or_else(|| last_text(element)).unwrap_or_default()
}

/// Each material slot takes its first occurrence across all `material` elements.
fn merge_materials(materials: Vec<WireMaterial>) -> Material {
    let mut material = Material::default();
    for wire in materials {
        if material.text.is_none()
            && let Some(text) = wire.mattext.into_iter().next()
        {
            material.text = Some(MaterialText {
                text_type: text.text_type.as_deref().map(TextType::from_mime).unwrap_or_default(),
                value: join_text(text.body),
            });
        }
        if material.image.is_none()
            && let Some(image) = wire.matimage.into_iter().next()
        {
            material.image = Some(MaterialImage {
                label: attr_or_element(image.label_attr, image.label),
                uri: attr_or_element(image.uri_attr, image.uri),
            });
        }
    }
    material
}

impl WireQuestestInterop {
    pub(super) fn into_document(self) -> Result<AssessmentDocument> {
        let items = self
            .items
            .into_iter()
            .map(WireItem::into_item)
            .collect::<Result<Vec<_>>>()?;
        Ok(AssessmentDocument { items })
    }
}

impl WireItem {
    fn into_item(mut self) -> Result<Item> {
        let ident = self.ident;
        let at = |path: &str| format!("item[{}]/{}", ident, path);

        let max_attempts = parse_int(|| at("@maxattempts"), self.max_attempts.as_deref())?;

        // Metadata blocks accumulate rather than replace each other.
        let metadata_fields = self
            .itemmetadata
            .into_iter()
            .flat_map(|m| m.qtimetadata)
            .flat_map(|m| m.qtimetadatafield)
            .map(|f| MetadataField {
                label: last_text(f.fieldlabel).unwrap_or_default(),
                entry: last_text(f.fieldentry).unwrap_or_default(),
            })
            .collect();

        let presentation = match self.presentation.pop() {
            Some(mut p) => Presentation {
                label: p.label,
                flow: p.flow.pop().map(|f| f.into_flow(&at)).transpose()?.unwrap_or_default(),
            },
            None => Presentation::default(),
        };

        let response_processing = self
            .resprocessing
            .pop()
            .map(|r| r.into_processing(&at))
            .transpose()?
            .unwrap_or_default();

        let feedbacks = self
            .itemfeedback
            .into_iter()
            .map(|mut f| ItemFeedback {
                ident: attr_or_element(f.ident_attr, f.ident),
                view: attr_or_element(f.view_attr, f.view),
                flow: Flow {
                    material: merge_materials(
                        f.flow_mat.pop().map(|m| m.material).unwrap_or_default(),
                    ),
                    response: ResponseChoice::default(),
                },
            })
            .collect();

        let solution_hint = match self.solutionhint.pop() {
            Some(hint) => {
                let index = last_text(hint.index);
                let points = last_text(hint.points);
                Some(SolutionHint {
                    index: parse_int(|| at("solutionhint/index"), index.as_deref())?,
                    points: parse_int(|| at("solutionhint/points"), points.as_deref())?,
                })
            },
            None => None,
        };

        Ok(Item {
            title: self.title,
            max_attempts,
            comment: last_text(self.qticomment).unwrap_or_default(),
            duration: last_text(self.duration).unwrap_or_default(),
            metadata_fields,
            presentation,
            response_processing,
            feedbacks,
            solution_hint,
            ident,
        })
    }
}

impl WireFlow {
    fn into_flow(mut self, at: &impl Fn(&str) -> String) -> Result<Flow> {
        let response = match self.response_lid.pop() {
            Some(mut lid) => {
                let render = lid.render_choice.pop().unwrap_or_default();
                let choices = render
                    .response_label
                    .into_iter()
                    .map(|label| -> Result<Choice> {
                        Ok(Choice {
                            ident: parse_int(
                                || at("response_label/@ident"),
                                label.ident.as_deref(),
                            )?,
                            material: merge_materials(label.material),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                ResponseChoice {
                    ident: lid.ident,
                    cardinality: lid.cardinality,
                    shuffle: parse_flag(|| at("render_choice/@shuffle"), render.shuffle.as_deref()),
                    choices,
                }
            },
            None => ResponseChoice::default(),
        };

        Ok(Flow {
            material: merge_materials(self.material),
            response,
        })
    }
}

impl WireResProcessing {
    fn into_processing(mut self, at: &impl Fn(&str) -> String) -> Result<ResponseProcessing> {
        let rules = self
            .respcondition
            .into_iter()
            .enumerate()
            .map(|(n, rule)| {
                rule.into_rule(&|path: &str| at(&format!("respcondition[{}]/{}", n, path)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ResponseProcessing {
            outcome_declaration: self
                .outcomes
                .pop()
                .and_then(|o| last_text(o.decvar))
                .unwrap_or_default(),
            rules,
        })
    }
}

impl WireRespCondition {
    fn into_rule(mut self, at: &impl Fn(&str) -> String) -> Result<ResponseRule> {
        let var_equal = |mut wire: Vec<WireVarEqual>, path: &str| -> Result<VarEqual> {
            let wire = wire.pop().unwrap_or_default();
            Ok(VarEqual {
                expected: parse_int(|| at(path), Some(join_text(wire.body).as_str()))?,
                respondent_ref: wire.respident,
            })
        };

        let condition = match self.conditionvar.pop() {
            Some(mut conditionvar) => match conditionvar.not.pop() {
                Some(not) => {
                    Condition::Not(var_equal(not.varequal, "conditionvar/not/varequal")?)
                },
                None => {
                    Condition::Equals(var_equal(conditionvar.varequal, "conditionvar/varequal")?)
                },
            },
            None => Condition::default(),
        };

        let action = self
            .setvar
            .pop()
            .map(|s| Action {
                verb: s.action,
                value: join_text(s.body),
            })
            .unwrap_or_default();

        let feedback_link = self
            .displayfeedback
            .pop()
            .map(|d| FeedbackLink {
                feedback_type: attr_or_element(d.feedback_type_attr, d.feedbacktype),
                ref_id: attr_or_element(d.link_ref_id_attr, d.linkrefid),
            })
            .unwrap_or_default();

        Ok(ResponseRule {
            continue_evaluating: parse_flag(|| at("@continue"), self.continue_flag.as_deref()),
            condition,
            action,
            feedback_link,
        })
    }
}

//================================================================================================
// Encoding
//================================================================================================

fn wire_materials(material: &Material) -> Vec<WireMaterial> {
    if material.is_empty() {
        return Vec::new();
    }
    vec![WireMaterial {
        mattext: material
            .text
            .iter()
            .map(|t| WireMatText {
                text_type: Some(t.text_type.as_mime().to_string()),
                body: text_parts(&t.value),
            })
            .collect(),
        matimage: material
            .image
            .iter()
            .map(|i| WireMatImage {
                label_attr: Some(i.label.clone()),
                uri_attr: Some(i.uri.clone()),
                label: Vec::new(),
                uri: Vec::new(),
            })
            .collect(),
    }]
}

fn wire_flow(flow: &Flow) -> WireFlow {
    let response = &flow.response;
    let response_lid = (*response != ResponseChoice::default()).then(|| WireResponseLid {
        ident: response.ident.clone(),
        cardinality: response.cardinality.clone(),
        render_choice: vec![WireRenderChoice {
            shuffle: Some(format_flag(response.shuffle).to_string()),
            response_label: response
                .choices
                .iter()
                .map(|c| WireResponseLabel {
                    ident: Some(c.ident.to_string()),
                    material: wire_materials(&c.material),
                })
                .collect(),
        }],
    });

    WireFlow {
        material: wire_materials(&flow.material),
        response_lid: response_lid.into_iter().collect(),
    }
}

fn wire_var_equal(var: &VarEqual) -> Vec<WireVarEqual> {
    vec![WireVarEqual {
        respident: var.respondent_ref.clone(),
        body: text_parts(&var.expected.to_string()),
    }]
}

fn wire_rule(rule: &ResponseRule) -> WireRespCondition {
    let conditionvar = match &rule.condition {
        Condition::Equals(var) => WireConditionVar {
            varequal: wire_var_equal(var),
            not: Vec::new(),
        },
        Condition::Not(var) => WireConditionVar {
            varequal: Vec::new(),
            not: vec![WireNot {
                varequal: wire_var_equal(var),
            }],
        },
    };

    let setvar = (rule.action != Action::default()).then(|| WireSetVar {
        action: rule.action.verb.clone(),
        body: text_parts(&rule.action.value),
    });
    let displayfeedback = (rule.feedback_link != FeedbackLink::default()).then(|| {
        WireDisplayFeedback {
            feedback_type_attr: Some(rule.feedback_link.feedback_type.clone()),
            link_ref_id_attr: Some(rule.feedback_link.ref_id.clone()),
            feedbacktype: Vec::new(),
            linkrefid: Vec::new(),
        }
    });

    WireRespCondition {
        continue_flag: Some(format_flag(rule.continue_evaluating).to_string()),
        conditionvar: vec![conditionvar],
        setvar: setvar.into_iter().collect(),
        displayfeedback: displayfeedback.into_iter().collect(),
    }
}

impl From<&Item> for WireItem {
    fn from(item: &Item) -> Self {
        let processing = &item.response_processing;
        let itemmetadata = (!item.metadata_fields.is_empty()).then(|| WireItemMetadata {
            qtimetadata: vec![WireQtiMetadata {
                qtimetadatafield: item
                    .metadata_fields
                    .iter()
                    .map(|f| WireMetadataField {
                        fieldlabel: text_element(&f.label),
                        fieldentry: text_element(&f.entry),
                    })
                    .collect(),
            }],
        });

        WireItem {
            ident: item.ident.clone(),
            title: item.title.clone(),
            max_attempts: Some(item.max_attempts.to_string()),
            qticomment: text_element(&item.comment),
            duration: text_element(&item.duration),
            itemmetadata: itemmetadata.into_iter().collect(),
            presentation: vec![WirePresentation {
                label: item.presentation.label.clone(),
                flow: vec![wire_flow(&item.presentation.flow)],
            }],
            resprocessing: vec![WireResProcessing {
                outcomes: vec![WireOutcomes {
                    decvar: text_element(&processing.outcome_declaration),
                }],
                respcondition: processing.rules.iter().map(wire_rule).collect(),
            }],
            itemfeedback: item
                .feedbacks
                .iter()
                .map(|f| WireItemFeedback {
                    ident_attr: Some(f.ident.clone()),
                    view_attr: Some(f.view.clone()),
                    ident: Vec::new(),
                    view: Vec::new(),
                    flow_mat: vec![WireFlowMat {
                        material: wire_materials(&f.flow.material),
                    }],
                })
                .collect(),
            solutionhint: item
                .solution_hint
                .map(|hint| WireSolutionHint {
                    index: text_element(&hint.index.to_string()),
                    points: text_element(&hint.points.to_string()),
                })
                .into_iter()
                .collect(),
        }
    }
}

impl From<&AssessmentDocument> for WireQuestestInterop {
    fn from(document: &AssessmentDocument) -> Self {
        WireQuestestInterop {
            items: document.items.iter().map(WireItem::from).collect(),
        }
    }
}
