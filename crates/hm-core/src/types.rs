use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const STEP_DELIMITER: &str = "->>>>";
pub const STEP_OUTPUT_PREFIX: &str = "step";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    pub show_in_list: bool,
    pub is_prompt_directive: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            show_in_list: true,
            is_prompt_directive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopSpec {
    pub referenced_source: Option<String>,
    /// `false` when the step says `ManyItems: TRUE`. Items are still issued one call each.
    pub aggregate_responses: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Default,
    Loop(LoopSpec),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Loop(_) => "Loop",
        }
    }

    pub fn referenced_source(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Loop(spec) => spec.referenced_source.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ActionBody {
    Text(String),
    Steps(Vec<Action>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub kind: NodeKind,
    pub declared_variables: Vec<String>,
    pub body: ActionBody,
    pub rules: Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum NodeContent {
    Leaf(String),
    Branch(Vec<AstNode>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstNode {
    pub kind: NodeKind,
    pub declared_variables: Vec<String>,
    pub rules: Rules,
    pub content: NodeContent,
    pub references: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    EmptyString,
    MissingUnderscore,
    NegativeNumber,
    IncorrectPrefix,
    IncorrectNumber,
}

impl RuleViolation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyString => "empty_string",
            Self::MissingUnderscore => "missing_underscore",
            Self::NegativeNumber => "negative_number",
            Self::IncorrectPrefix => "incorrect_prefix",
            Self::IncorrectNumber => "incorrect_number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    Valid,
    NoActions,
    NoVarsInFirstStep,
    StepFailure { step: usize, reason: RuleViolation },
}

impl ValidationStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn step(&self) -> Option<usize> {
        match self {
            Self::StepFailure { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn code(&self) -> String {
        match self {
            Self::Valid => "valid".to_string(),
            Self::NoActions => "no_actions".to_string(),
            Self::NoVarsInFirstStep => "no_vars_in_first_step".to_string(),
            Self::StepFailure { step, reason } => format!("step_{}_{}", step, reason.as_str()),
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

pub fn step_output_key(step: usize) -> String {
    format!("{}_{}", STEP_OUTPUT_PREFIX, step)
}

pub fn loop_output_key(step: usize, item: usize) -> String {
    format!("{}_{}_{}", STEP_OUTPUT_PREFIX, step, item)
}

/// True for names of the exact shape `step_<digits>`.
pub fn is_step_reference(name: &str) -> bool {
    step_reference_regex().is_match(name)
}

fn step_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^step_\d+$").expect("step reference regex"))
}
