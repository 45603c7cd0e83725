use std::sync::OnceLock;

use hm_core::{Action, ActionBody, HeroMlError, LoopSpec, NodeKind, Rules, Step};
use regex::Regex;

use crate::scanner::declared_variables;

pub const HIDE_ITEM_FLAG: &str = "--hide-item-from-list";
pub const PROMPT_DIRECTIVE_FLAG: &str = "--is-ai-prompt";

const LOOP_ACTION_NAME: &str = "Loop";
const FOR_EVERY_ITEM_HEADER: &str = "ForEveryItemDoThis:";

#[derive(Debug, Clone, PartialEq, Eq)]
struct LoopHeader {
    action: String,
    for_every_item: String,
    aggregate_responses: bool,
    referenced_source: Option<String>,
}

pub fn parse_rules(text: &str) -> Rules {
    Rules {
        show_in_list: !text.contains(HIDE_ITEM_FLAG),
        is_prompt_directive: text.contains(PROMPT_DIRECTIVE_FLAG),
    }
}

pub fn extract_actions(steps: &[Step]) -> Result<Vec<Action>, HeroMlError> {
    steps.iter().map(extract_action).collect()
}

pub fn extract_action(step: &Step) -> Result<Action, HeroMlError> {
    let rules = parse_rules(&step.text);
    let declared = declared_variables(&step.text);

    let Some(header) = parse_loop_header(&step.text) else {
        return Ok(Action {
            kind: NodeKind::Default,
            declared_variables: declared,
            body: ActionBody::Text(step.text.trim().to_string()),
            rules,
        });
    };

    if header.action != LOOP_ACTION_NAME {
        return Err(HeroMlError::at_step(
            "ACTION_KIND_UNKNOWN",
            format!(
                "Step {} declares unsupported action \"{}\"; only \"{}\" is known.",
                step.index, header.action, LOOP_ACTION_NAME
            ),
            step.index,
        ));
    }

    Ok(Action {
        kind: NodeKind::Loop(LoopSpec {
            referenced_source: header.referenced_source,
            aggregate_responses: header.aggregate_responses,
        }),
        declared_variables: declared,
        body: ActionBody::Text(header.for_every_item),
        rules,
    })
}

fn parse_loop_header(text: &str) -> Option<LoopHeader> {
    let action = action_regex().captures(text)?.get(1)?.as_str().to_string();
    let for_every_item = for_every_item_regex()
        .captures(text)?
        .get(1)?
        .as_str()
        .trim()
        .to_string();
    let aggregate_responses = match many_items_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
    {
        Some(flag) => flag.as_str() != "TRUE",
        None => true,
    };

    Some(LoopHeader {
        action,
        for_every_item,
        aggregate_responses,
        referenced_source: find_referenced_source(text),
    })
}

fn find_referenced_source(text: &str) -> Option<String> {
    let lines = text.lines().collect::<Vec<_>>();
    let start = lines
        .iter()
        .position(|line| line.contains(FOR_EVERY_ITEM_HEADER))?;

    lines[start..].iter().find_map(|line| {
        trailing_reference_regex()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|name| name.as_str().to_string())
    })
}

fn action_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"ACTION: (\w+)").expect("action regex"))
}

fn for_every_item_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"ForEveryItemDoThis: (.+)").expect("for-every-item regex"))
}

fn many_items_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"ManyItems: (TRUE|FALSE)").expect("many-items regex"))
}

fn trailing_reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}\s*$").expect("trailing reference regex"))
}
