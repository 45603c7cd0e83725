use hm_core::{is_step_reference, HeroMlError, HmValue};
use hm_parser::reference_matches;

use crate::{GlobalEnvironment, LocalEnvironment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencePass {
    FreeForm,
    StepOutput,
}

impl ReferencePass {
    fn accepts(self, name: &str) -> bool {
        match self {
            Self::FreeForm => !is_step_reference(name),
            Self::StepOutput => is_step_reference(name),
        }
    }
}

/// Replaces the placeholders owned by `pass`, leaving the other class untouched.
pub fn substitute_pass<'a, F>(
    text: &str,
    pass: ReferencePass,
    resolve: F,
) -> Result<String, HeroMlError>
where
    F: Fn(&str) -> Option<&'a HmValue>,
{
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0usize;

    for found in reference_matches(text) {
        if !pass.accepts(&found.name) {
            continue;
        }
        let value = resolve(&found.name).ok_or_else(|| {
            HeroMlError::new(
                "ENGINE_VAR_UNDEFINED",
                format!("Undefined variable: {}", found.name),
            )
        })?;
        out.push_str(&text[cursor..found.start]);
        out.push_str(&value.to_prompt_text());
        cursor = found.end;
    }

    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Free-form pass (local bindings shadow globals), then the step-output pass
/// against the global environment only.
pub fn render_prompt(
    text: &str,
    global: &GlobalEnvironment,
    local: Option<&LocalEnvironment>,
) -> Result<String, HeroMlError> {
    let free = substitute_pass(text, ReferencePass::FreeForm, |name| {
        local
            .and_then(|bindings| bindings.get(name))
            .or_else(|| global.get(name))
    })?;
    substitute_pass(&free, ReferencePass::StepOutput, |name| global.get(name))
}

#[cfg(test)]
mod substitute_tests {
    use super::*;
    use hm_parser::scan_references;
    use std::collections::BTreeMap;

    fn env(entries: &[(&str, HmValue)]) -> GlobalEnvironment {
        GlobalEnvironment::from_values(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), value.clone()))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn passes_only_touch_their_own_class() {
        let global = env(&[
            ("name", HmValue::from("Sam")),
            ("step_1", HmValue::from("out")),
        ]);
        let free = substitute_pass("{{name}} {{step_1}}", ReferencePass::FreeForm, |name| {
            global.get(name)
        })
        .expect("free pass");
        assert_eq!(free, "Sam {{step_1}}");

        let step = substitute_pass("{{name}} {{step_1}}", ReferencePass::StepOutput, |name| {
            global.get(name)
        })
        .expect("step pass");
        assert_eq!(step, "{{name}} out");
    }

    #[test]
    fn render_prompt_resolves_every_reference() {
        let global = env(&[
            ("n", HmValue::Number(2.0)),
            ("colors", HmValue::Array(vec![HmValue::from("red"), HmValue::from("blue")])),
            ("step_1", HmValue::from("draft")),
        ]);
        let text = "Use {{n}} of {{colors}} to improve {{step_1}} ({{n}})";
        let rendered = render_prompt(text, &global, None).expect("render");
        assert_eq!(rendered, "Use 2 of red, blue to improve draft (2)");
        assert!(scan_references(&rendered).is_empty());
    }

    #[test]
    fn local_bindings_shadow_free_form_names_only() {
        let global = env(&[
            ("item", HmValue::from("global")),
            ("step_1", HmValue::from("list")),
        ]);
        let mut local = LocalEnvironment::new();
        local.bind("item", HmValue::from("local"));
        local.bind("step_1", HmValue::from("shadow"));
        let rendered =
            render_prompt("{{item}} / {{step_1}}", &global, Some(&local)).expect("render");
        assert_eq!(rendered, "local / list");
    }

    #[test]
    fn undefined_reference_is_an_error() {
        let global = env(&[("step_1", HmValue::from("x"))]);
        let error = render_prompt("{{step_1}} {{unknown}}", &global, None)
            .expect_err("unknown should fail");
        assert_eq!(error.code, "ENGINE_VAR_UNDEFINED");
        assert!(error.message.contains("unknown"));

        let error =
            render_prompt("{{step_2}}", &global, None).expect_err("missing step should fail");
        assert_eq!(error.code, "ENGINE_VAR_UNDEFINED");
    }
}
