use std::collections::BTreeSet;

use hm_core::{Action, ActionBody, AstNode, HeroMlError, NodeContent, NodeKind};
use hm_parser::scan_references;

pub fn build_ast(actions: &[Action]) -> Result<Vec<AstNode>, HeroMlError> {
    actions
        .iter()
        .enumerate()
        .map(|(offset, action)| build_node(action, offset + 1))
        .collect()
}

fn build_node(action: &Action, step: usize) -> Result<AstNode, HeroMlError> {
    let content = match (&action.kind, &action.body) {
        (_, ActionBody::Text(text)) => NodeContent::Leaf(text.clone()),
        (NodeKind::Loop(_), ActionBody::Steps(_)) => {
            return Err(HeroMlError::at_step(
                "AST_LOOP_BODY_INVALID",
                format!("Loop at step {} must carry a single templated body.", step),
                step,
            ));
        }
        (NodeKind::Default, ActionBody::Steps(children)) => NodeContent::Branch(
            children
                .iter()
                .map(|child| build_node(child, step))
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    let mut references = BTreeSet::new();
    collect_content_references(&content, &mut references);
    references.extend(action.declared_variables.iter().cloned());

    Ok(AstNode {
        kind: action.kind.clone(),
        declared_variables: action.declared_variables.clone(),
        rules: action.rules.clone(),
        content,
        references,
    })
}

fn collect_content_references(content: &NodeContent, out: &mut BTreeSet<String>) {
    match content {
        NodeContent::Leaf(text) => out.extend(scan_references(text)),
        NodeContent::Branch(children) => {
            for child in children {
                collect_content_references(&child.content, out);
            }
        }
    }
}
