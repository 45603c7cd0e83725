mod extract;
mod scanner;
mod splitter;

pub use extract::{
    extract_action, extract_actions, parse_rules, HIDE_ITEM_FLAG, PROMPT_DIRECTIVE_FLAG,
};
pub use scanner::{declared_variables, reference_matches, scan_references, ReferenceMatch};
pub use splitter::split_steps;
