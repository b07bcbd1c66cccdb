//! Response processing: ordered scoring rules.

/// Comparison of a response against an expected choice ident.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarEqual {
    /// Ident of the response construct being compared
    pub respondent_ref: String,
    /// Choice ident the response must equal
    pub expected: i64,
}

impl VarEqual {
    pub fn new(respondent_ref: impl Into<String>, expected: i64) -> Self {
        Self {
            respondent_ref: respondent_ref.into(),
            expected,
        }
    }
}

/// Condition of a response rule.
///
/// Negation nests at most one level deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The choice was selected
    Equals(VarEqual),
    /// The choice was not selected
    Not(VarEqual),
}

impl Default for Condition {
    fn default() -> Self {
        Condition::Equals(VarEqual::default())
    }
}

impl Condition {
    /// The comparison under the optional negation.
    pub fn var_equal(&self) -> &VarEqual {
        match self {
            Condition::Equals(v) | Condition::Not(v) => v,
        }
    }

    #[inline]
    pub fn is_negated(&self) -> bool {
        matches!(self, Condition::Not(_))
    }
}

/// `setvar` action applied when a rule's condition holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// e.g. `Add` or `Set`
    pub verb: String,
    pub value: String,
}

/// Reference from a rule to an item feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackLink {
    pub feedback_type: String,
    /// Ident of the [`ItemFeedback`](super::ItemFeedback) to show
    pub ref_id: String,
}

/// One `respcondition`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseRule {
    pub continue_evaluating: bool,
    pub condition: Condition,
    pub action: Action,
    pub feedback_link: FeedbackLink,
}

/// Scoring logic of an item. Rules keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseProcessing {
    pub outcome_declaration: String,
    pub rules: Vec<ResponseRule>,
}
