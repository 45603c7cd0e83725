use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Every `{{name}}` occurrence with its byte range, in order, duplicates included.
pub fn reference_matches(text: &str) -> Vec<ReferenceMatch> {
    reference_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(ReferenceMatch {
                name: name.as_str().to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

pub fn scan_references(text: &str) -> Vec<String> {
    reference_matches(text)
        .into_iter()
        .map(|found| found.name)
        .collect()
}

/// References in first-appearance order with repeats dropped.
pub fn declared_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    scan_references(text)
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

pub(crate) fn reference_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{([^{}\n]*?)\}\}").expect("reference regex"))
}
