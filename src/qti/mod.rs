//! QTI item document support.
//!
//! The item document lists the questions of a pool in presentation order.
//! Each `item` carries its metadata, the question body with a choice-based
//! response construct, ordered response-processing rules, feedback blocks and
//! an optional solution hint.
//!
//! Response rules compare a response against a choice ident, optionally
//! negated:
//!
//! ```xml
//! <respcondition continue="Yes">
//!   <conditionvar>
//!     <not><varequal respident="MCSR">1</varequal></not>
//!   </conditionvar>
//!   <setvar action="Add">0</setvar>
//!   <displayfeedback feedbacktype="Response" linkrefid="response_1"/>
//! </respcondition>
//! ```
//!
//! The negated form decodes to [`Condition::Not`], the bare form to
//! [`Condition::Equals`].
//!
//! # Example
//!
//! ```rust
//! use quizpack::qti::{Condition, decode_assessment};
//!
//! # fn main() -> quizpack::Result<()> {
//! let xml = br#"<questestinterop>
//!   <item ident="q1" title="Capital" maxattempts="2">
//!     <resprocessing>
//!       <respcondition continue="Yes">
//!         <conditionvar><varequal respident="MCSR">0</varequal></conditionvar>
//!         <setvar action="Add">1</setvar>
//!       </respcondition>
//!     </resprocessing>
//!   </item>
//! </questestinterop>"#;
//!
//! let document = decode_assessment(xml)?;
//! let rule = &document.items[0].response_processing.rules[0];
//! assert!(matches!(rule.condition, Condition::Equals(ref v) if v.expected == 0));
//! # Ok(())
//! # }
//! ```

mod item;
mod presentation;
mod processing;
mod wire;

pub use item::{AssessmentDocument, Item, ItemFeedback, MetadataField, SolutionHint};
pub use presentation::{
    Choice, Flow, Material, MaterialImage, MaterialText, Presentation, ResponseChoice,
    TEXT_PLAIN, TEXT_XHTML, TextType,
};
pub use processing::{
    Action, Condition, FeedbackLink, ResponseProcessing, ResponseRule, VarEqual,
};

use crate::common::{Result, xml};
use std::path::Path;
use wire::WireQuestestInterop;

/// Decode an item document.
///
/// Items keep document order. Unknown elements are ignored, missing
/// optional parts decode empty and a repeated single-valued element keeps its
/// last occurrence, but a non-integer in an integer field fails
/// the whole document with [`ErrorKind::TypeMismatch`](crate::ErrorKind).
pub fn decode_assessment(bytes: &[u8]) -> Result<AssessmentDocument> {
    let wire: WireQuestestInterop = xml::from_bytes(bytes)?;
    wire.into_document()
}

/// Read and decode an item document file.
///
/// Decode errors are wrapped in [`Error::InFile`](crate::Error::InFile)
/// with `path`; read failures are [`Error::Io`](crate::Error::Io).
pub fn read_assessment_file<P: AsRef<Path>>(path: P) -> Result<AssessmentDocument> {
    let path = path.as_ref();
    decode_assessment(&xml::read_file(path)?).map_err(|e| e.in_file(path))
}

/// Encode an item document using the same element mapping as
/// [`decode_assessment`].
pub fn encode_assessment(document: &AssessmentDocument) -> Result<String> {
    xml::to_string(wire::ROOT, &WireQuestestInterop::from(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Error, ErrorKind};

    const SINGLE_CHOICE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE questestinterop SYSTEM "ims_qtiasiv1p2p1.dtd">
<questestinterop>
  <item ident="il_0_qst_17" title="Capital of France" maxattempts="3">
    <qticomment>Geography basics</qticomment>
    <duration>P0Y0M0DT0H1M0S</duration>
    <itemmetadata>
      <qtimetadata>
        <qtimetadatafield>
          <fieldlabel>ILIAS_VERSION</fieldlabel>
          <fieldentry>7.21</fieldentry>
        </qtimetadatafield>
        <qtimetadatafield>
          <fieldlabel>QUESTIONTYPE</fieldlabel>
          <fieldentry>SINGLE CHOICE QUESTION</fieldentry>
        </qtimetadatafield>
        <qtimetadatafield>
          <fieldlabel>AUTHOR</fieldlabel>
          <fieldentry>root</fieldentry>
        </qtimetadatafield>
        <qtimetadatafield>
          <fieldlabel>AUTHOR</fieldlabel>
          <fieldentry>editor</fieldentry>
        </qtimetadatafield>
      </qtimetadata>
    </itemmetadata>
    <presentation label="Capital of France">
      <flow>
        <material>
          <mattext texttype="text/xhtml">&lt;p&gt;Which city is the capital?&lt;/p&gt;</mattext>
          <matimage label="map.png" uri="objects/il_0_mob_5/map.png"/>
        </material>
        <response_lid ident="MCSR" rcardinality="Single">
          <render_choice shuffle="Yes">
            <response_label ident="0">
              <material><mattext texttype="text/plain">Paris</mattext></material>
            </response_label>
            <response_label ident="1">
              <material><mattext texttype="text/plain">Lyon</mattext></material>
            </response_label>
          </render_choice>
        </response_lid>
      </flow>
    </presentation>
    <resprocessing>
      <outcomes><decvar/></outcomes>
      <respcondition continue="Yes">
        <conditionvar><varequal respident="MCSR">0</varequal></conditionvar>
        <setvar action="Add">2</setvar>
        <displayfeedback feedbacktype="Response" linkrefid="response_0"/>
      </respcondition>
      <respcondition continue="Yes">
        <conditionvar><not><varequal respident="MCSR">0</varequal></not></conditionvar>
        <setvar action="Add">0</setvar>
        <displayfeedback feedbacktype="Response" linkrefid="response_1"/>
      </respcondition>
    </resprocessing>
    <itemfeedback ident="response_0" view="All">
      <flow_mat><material><mattext texttype="text/plain">Correct</mattext></material></flow_mat>
    </itemfeedback>
    <itemfeedback ident="response_1" view="All">
      <flow_mat><material><mattext texttype="text/plain">Try again</mattext></material></flow_mat>
    </itemfeedback>
    <solutionhint>
      <index>1</index>
      <points>2</points>
    </solutionhint>
  </item>
</questestinterop>"#;

    fn decode(xml: &str) -> Result<AssessmentDocument> {
        decode_assessment(xml.as_bytes())
    }

    #[test]
    fn test_decode_single_choice_item() {
        let document = decode(SINGLE_CHOICE).unwrap();
        assert_eq!(document.len(), 1);

        let item = &document.items[0];
        assert_eq!(item.ident, "il_0_qst_17");
        assert_eq!(item.title, "Capital of France");
        assert_eq!(item.max_attempts, 3);
        assert_eq!(item.comment, "Geography basics");
        assert_eq!(item.duration, "P0Y0M0DT0H1M0S");
        assert_eq!(item.solution_hint, Some(SolutionHint { index: 1, points: 2 }));

        let body = &item.presentation.flow;
        assert_eq!(item.presentation.label, "Capital of France");
        let text = body.material.text.as_ref().unwrap();
        assert_eq!(text.text_type, TextType::RichText);
        assert_eq!(text.value, "<p>Which city is the capital?</p>");
        assert_eq!(
            body.material.image,
            Some(MaterialImage {
                label: "map.png".to_string(),
                uri: "objects/il_0_mob_5/map.png".to_string(),
            })
        );

        let response = &body.response;
        assert_eq!(response.ident, "MCSR");
        assert_eq!(response.cardinality, "Single");
        assert!(response.shuffle);
        assert_eq!(response.choices.len(), 2);
        assert_eq!(response.choices[0].ident, 0);
        assert_eq!(response.choices[1].material, Material::plain("Lyon"));
    }

    #[test]
    fn test_metadata_fields_keep_order_and_duplicates() {
        let document = decode(SINGLE_CHOICE).unwrap();
        let item = &document.items[0];

        let labels: Vec<_> = item.metadata_fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["ILIAS_VERSION", "QUESTIONTYPE", "AUTHOR", "AUTHOR"]);
        assert_eq!(item.metadata("AUTHOR").collect::<Vec<_>>(), ["root", "editor"]);
    }

    #[test]
    fn test_negation_is_kept_structurally() {
        let document = decode(SINGLE_CHOICE).unwrap();
        let rules = &document.items[0].response_processing.rules;

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].condition, Condition::Equals(VarEqual::new("MCSR", 0)));
        assert_eq!(rules[1].condition, Condition::Not(VarEqual::new("MCSR", 0)));
        assert!(rules.iter().all(|r| r.continue_evaluating));
        assert_eq!(
            rules[0].action,
            Action {
                verb: "Add".to_string(),
                value: "2".to_string(),
            }
        );
    }

    #[test]
    fn test_feedback_links_resolve() {
        let document = decode(SINGLE_CHOICE).unwrap();
        let item = &document.items[0];
        let rule = &item.response_processing.rules[1];

        assert_eq!(rule.feedback_link.feedback_type, "Response");
        let feedback = item.feedback(&rule.feedback_link.ref_id).unwrap();
        assert_eq!(feedback.view, "All");
        assert_eq!(feedback.flow.material.text_value(), "Try again");
        assert!(item.feedback("missing").is_none());
    }

    #[test]
    fn test_bare_varequal_with_respident_r1() {
        let xml = r#"<questestinterop><item ident="a"><resprocessing>
            <respcondition><conditionvar><varequal respident="R1">2</varequal></conditionvar></respcondition>
            <respcondition><conditionvar><not><varequal respident="R1">2</varequal></not></conditionvar></respcondition>
        </resprocessing></item></questestinterop>"#;

        let document = decode(xml).unwrap();
        let rules = &document.items[0].response_processing.rules;
        assert_eq!(rules[0].condition, Condition::Equals(VarEqual::new("R1", 2)));
        assert_eq!(rules[1].condition, Condition::Not(VarEqual::new("R1", 2)));
        assert!(!rules[0].continue_evaluating);
    }

    #[test]
    fn test_items_keep_document_order() {
        let xml = r#"<questestinterop>
            <item ident="q3" title="third"/>
            <item ident="q1" title="first"/>
            <item ident="q2" title="second"/>
        </questestinterop>"#;

        let document = decode(xml).unwrap();
        let idents: Vec<_> = document.iter().map(|i| i.ident.as_str()).collect();
        assert_eq!(idents, ["q3", "q1", "q2"]);
        assert_eq!(document.item("q1").unwrap().title, "first");
    }

    #[test]
    fn test_missing_parts_decode_empty() {
        let document = decode(r#"<questestinterop><item ident="bare"/></questestinterop>"#).unwrap();
        let item = &document.items[0];

        assert_eq!(item.max_attempts, 0);
        assert!(item.metadata_fields.is_empty());
        assert!(item.feedbacks.is_empty());
        assert!(item.solution_hint.is_none());
        assert_eq!(item.presentation, Presentation::default());
        assert_eq!(item.response_processing, ResponseProcessing::default());
        assert!(item.presentation.flow.material.image.is_none());
    }

    #[test]
    fn test_empty_itemmetadata_yields_empty_fields() {
        let xml = r#"<questestinterop><item ident="a">
            <itemmetadata><qtimetadata></qtimetadata></itemmetadata>
        </item></questestinterop>"#;

        let document = decode(xml).unwrap();
        assert_eq!(document.items[0].metadata_fields, Vec::<MetadataField>::new());
    }

    #[test]
    fn test_empty_document() {
        assert!(decode("<questestinterop/>").unwrap().is_empty());
    }

    #[test]
    fn test_non_integer_maxattempts_fails_document() {
        let xml = r#"<questestinterop>
            <item ident="ok" maxattempts="1"/>
            <item ident="bad" maxattempts="abc"/>
        </questestinterop>"#;

        let err = decode(xml).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        match err {
            Error::TypeMismatch { field, value, .. } => {
                assert_eq!(field, "item[bad]/@maxattempts");
                assert_eq!(value, "abc");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_integer_numbers_fail() {
        let choice = r#"<questestinterop><item ident="a"><presentation><flow>
            <response_lid ident="R"><render_choice><response_label ident="A"/></render_choice></response_lid>
        </flow></presentation></item></questestinterop>"#;
        assert_eq!(decode(choice).unwrap_err().kind(), ErrorKind::TypeMismatch);

        let expected = r#"<questestinterop><item ident="a"><resprocessing><respcondition>
            <conditionvar><not><varequal respident="R">two</varequal></not></conditionvar>
        </respcondition></resprocessing></item></questestinterop>"#;
        let err = decode(expected).unwrap_err();
        assert!(err.to_string().contains("respcondition[0]/conditionvar/not/varequal"));

        let hint = r#"<questestinterop><item ident="a">
            <solutionhint><index>1</index><points>x</points></solutionhint>
        </item></questestinterop>"#;
        assert_eq!(decode(hint).unwrap_err().kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_malformed_document() {
        let err = decode(r#"<questestinterop><item ident="a">"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = decode_assessment(b"<questestinterop>\xC3\x28</questestinterop>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_element_form_of_attributes() {
        let xml = r#"<questestinterop><item ident="a">
            <presentation><flow><material>
                <matimage><label>chart</label><uri>img/chart.png</uri></matimage>
            </material></flow></presentation>
            <resprocessing><respcondition>
                <displayfeedback><feedbacktype>Response</feedbacktype><linkrefid>fb</linkrefid></displayfeedback>
            </respcondition></resprocessing>
            <itemfeedback><ident>fb</ident><view>All</view></itemfeedback>
        </item></questestinterop>"#;

        let document = decode(xml).unwrap();
        let item = &document.items[0];
        let image = item.presentation.flow.material.image.as_ref().unwrap();
        assert_eq!(image.label, "chart");
        assert_eq!(image.uri, "img/chart.png");
        assert!(item.presentation.flow.material.text.is_none());

        let link = &item.response_processing.rules[0].feedback_link;
        assert_eq!(link.ref_id, "fb");
        assert_eq!(item.feedback("fb").unwrap().view, "All");
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let xml = r#"<questestinterop>
            <assessment_meta>ignored</assessment_meta>
            <item ident="a" lang="en">
                <itemmetadata><custom>x</custom></itemmetadata>
                <presentation label="L"><flow><material><mattext>plain</mattext></material></flow></presentation>
            </item>
        </questestinterop>"#;

        let document = decode(xml).unwrap();
        let material = &document.items[0].presentation.flow.material;
        assert_eq!(material.text_value(), "plain");
        assert_eq!(material.text.as_ref().unwrap().text_type, TextType::Plain);
    }

    #[test]
    fn test_mixed_content_keeps_direct_text() {
        let xml = r#"<questestinterop><item ident="a"><presentation><flow>
            <material><mattext texttype="text/xhtml">Intro <b>bold</b> end</mattext></material>
        </flow></presentation>
        <qticomment>see <i>notes</i></qticomment>
        </item></questestinterop>"#;

        let document = decode(xml).unwrap();
        let item = &document.items[0];
        let text = item.presentation.flow.material.text.as_ref().unwrap();
        assert_eq!(text.text_type, TextType::RichText);
        assert!(text.value.starts_with("Intro"));
        assert!(text.value.ends_with("end"));
        assert!(!text.value.contains("bold"));
        assert!(item.comment.starts_with("see"));
    }

    #[test]
    fn test_repeated_elements_keep_last() {
        let xml = r#"<questestinterop><item ident="a">
            <qticomment>draft</qticomment>
            <qticomment>final</qticomment>
            <resprocessing><respcondition>
                <conditionvar>
                    <varequal respident="R">1</varequal>
                    <varequal respident="R">2</varequal>
                </conditionvar>
                <setvar action="Add">1</setvar>
                <setvar action="Set">5</setvar>
            </respcondition></resprocessing>
        </item></questestinterop>"#;

        let document = decode(xml).unwrap();
        let item = &document.items[0];
        assert_eq!(item.comment, "final");

        let rule = &item.response_processing.rules[0];
        assert_eq!(
            rule.condition,
            Condition::Equals(VarEqual {
                respondent_ref: "R".to_string(),
                expected: 2,
            })
        );
        assert_eq!(rule.action.verb, "Set");
        assert_eq!(rule.action.value, "5");
    }

    #[test]
    fn test_unrecognized_flags_read_as_false() {
        let xml = r#"<questestinterop><item ident="a">
            <presentation><flow><response_lid ident="R">
                <render_choice shuffle="Random"/>
            </response_lid></flow></presentation>
            <resprocessing><respcondition continue="Maybe"/></resprocessing>
        </item></questestinterop>"#;

        let document = decode(xml).unwrap();
        let item = &document.items[0];
        assert!(!item.presentation.flow.response.shuffle);
        assert!(!item.response_processing.rules[0].continue_evaluating);
    }

    #[test]
    fn test_read_assessment_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pool_qti.xml");
        std::fs::write(&path, SINGLE_CHOICE).unwrap();
        assert_eq!(read_assessment_file(&path).unwrap().len(), 1);

        std::fs::write(&path, r#"<questestinterop><item ident="q" maxattempts="x"/>"#).unwrap();
        let err = read_assessment_file(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(matches!(err, Error::InFile { .. }));

        let missing = dir.path().join("missing_qti.xml");
        assert!(matches!(read_assessment_file(&missing).unwrap_err(), Error::Io { .. }));
    }

    #[test]
    fn test_encode_round_trip() {
        let document = decode(SINGLE_CHOICE).unwrap();
        let xml = encode_assessment(&document).unwrap();

        assert!(xml.contains("<questestinterop>"));
        assert!(xml.contains(r#"<itemfeedback ident="response_0" view="All">"#));
        assert!(xml.contains("<not>"));
        assert_eq!(AssessmentDocument::from_xml(&xml).unwrap(), document);
    }
}
