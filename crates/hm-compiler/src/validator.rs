use hm_core::{
    step_output_key, Action, ActionBody, NodeKind, RuleViolation, ValidationStatus,
    STEP_OUTPUT_PREFIX,
};
use hm_parser::scan_references;

pub fn validate_actions(actions: &[Action]) -> ValidationStatus {
    let Some(first) = actions.first() else {
        return ValidationStatus::NoActions;
    };

    let mut whitelist = first.declared_variables.clone();
    if whitelist.is_empty() {
        return ValidationStatus::NoVarsInFirstStep;
    }

    for (offset, action) in actions.iter().enumerate() {
        let step = offset + 1;

        if let Err(reason) = check_action(action, step, &whitelist) {
            return ValidationStatus::StepFailure { step, reason };
        }

        let produced = step_output_key(step);
        if !whitelist.contains(&produced) {
            whitelist.push(produced);
        }
    }

    ValidationStatus::Valid
}

fn check_action(action: &Action, step: usize, whitelist: &[String]) -> Result<(), RuleViolation> {
    match &action.body {
        ActionBody::Text(text) => check_prompt_references(text, step, whitelist)?,
        ActionBody::Steps(children) => {
            for child in children {
                if let ActionBody::Text(text) = &child.body {
                    check_prompt_references(text, step, whitelist)?;
                }
            }
        }
    }

    if let NodeKind::Loop(spec) = &action.kind {
        if let Some(source) = &spec.referenced_source {
            check_reference(source, step, whitelist)?;
        }
    }

    Ok(())
}

/// Checks one prompt body against the names legal at `step`.
pub fn check_prompt_references(
    prompt: &str,
    step: usize,
    whitelist: &[String],
) -> Result<(), RuleViolation> {
    if prompt.trim().is_empty() {
        return Err(RuleViolation::EmptyString);
    }

    for name in scan_references(prompt) {
        check_reference(&name, step, whitelist)?;
    }

    Ok(())
}

fn check_reference(name: &str, step: usize, whitelist: &[String]) -> Result<(), RuleViolation> {
    if whitelist.iter().any(|allowed| allowed == name) {
        return Ok(());
    }

    let Some((prefix, number)) = name.split_once('_') else {
        return Err(RuleViolation::MissingUnderscore);
    };

    if number.contains('-') {
        return Err(RuleViolation::NegativeNumber);
    }

    if prefix != STEP_OUTPUT_PREFIX {
        return Err(RuleViolation::IncorrectPrefix);
    }

    match number.parse::<usize>() {
        Ok(index) if index >= 1 && index < step => Ok(()),
        _ => Err(RuleViolation::IncorrectNumber),
    }
}
