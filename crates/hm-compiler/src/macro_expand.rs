use std::cmp::Reverse;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub token: &'static str,
    pub expansion: &'static str,
}

/// Replaces every directive token with its expansion in one left-to-right pass,
/// then normalizes whitespace. Line breaks survive because the loop grammar is line based.
pub fn expand_directives(source: &str, table: &[Directive]) -> String {
    let expanded = match directive_regex(table) {
        Some(regex) => regex
            .replace_all(source, |caps: &regex::Captures<'_>| {
                let token = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                table
                    .iter()
                    .find(|directive| directive.token == token)
                    .map(|directive| directive.expansion)
                    .unwrap_or(token)
                    .to_string()
            })
            .into_owned(),
        None => source.to_string(),
    };
    collapse_whitespace(&expanded)
}

fn directive_regex(table: &[Directive]) -> Option<Regex> {
    let mut tokens = table
        .iter()
        .map(|directive| directive.token)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>();
    if tokens.is_empty() {
        return None;
    }
    // Longest first so a token that prefixes another never wins the alternation.
    tokens.sort_by_key(|token| Reverse(token.len()));
    let pattern = tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).ok()
}

fn collapse_whitespace(text: &str) -> String {
    let mut lines = Vec::new();
    let mut previous_blank = false;
    for line in text.lines() {
        let collapsed = horizontal_space_regex().replace_all(line, " ");
        let collapsed = collapsed.trim_end();
        let blank = collapsed.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        lines.push(if blank { "" } else { collapsed }.to_string());
    }
    lines.join("\n").trim().to_string()
}

fn horizontal_space_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[ \t]+").expect("horizontal space regex"))
}
