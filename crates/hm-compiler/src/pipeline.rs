use hm_core::{is_step_reference, Action, AstNode, HeroMlError, Step, ValidationStatus};
use hm_parser::{extract_actions, split_steps};
use tracing::debug;

use crate::{build_ast, expand_directives, validate_actions, Directive, DEFAULT_DIRECTIVES};

#[derive(Debug, Clone)]
pub struct CompiledScript {
    pub expanded_source: String,
    pub steps: Vec<Step>,
    pub actions: Vec<Action>,
    pub ast: Vec<AstNode>,
}

impl CompiledScript {
    pub fn required_inputs(&self) -> Vec<String> {
        required_inputs(&self.ast)
    }
}

pub fn compile_script(source: &str) -> Result<CompiledScript, HeroMlError> {
    compile_script_with(source, DEFAULT_DIRECTIVES)
}

pub fn compile_script_with(
    source: &str,
    directives: &[Directive],
) -> Result<CompiledScript, HeroMlError> {
    let expanded_source = expand_directives(source, directives);
    let steps = split_steps(&expanded_source);
    let actions = extract_actions(&steps)?;

    let status = validate_actions(&actions);
    debug!(status = %status, steps = steps.len(), "validated script");
    if !status.is_valid() {
        return Err(validation_error(status));
    }

    let ast = build_ast(&actions)?;
    Ok(CompiledScript {
        expanded_source,
        steps,
        actions,
        ast,
    })
}

/// Names the caller must supply before interpretation: the first step's
/// declared variables minus step-output references.
pub fn required_inputs(ast: &[AstNode]) -> Vec<String> {
    let Some(first) = ast.first() else {
        return Vec::new();
    };
    first
        .declared_variables
        .iter()
        .filter(|name| !is_step_reference(name))
        .cloned()
        .collect()
}

fn validation_error(status: ValidationStatus) -> HeroMlError {
    let message = match status.step() {
        Some(step) => format!("Script failed validation at step {}: {}.", step, status),
        None => format!("Script failed validation: {}.", status),
    };
    HeroMlError {
        code: status.code(),
        message,
        step: status.step(),
    }
}
