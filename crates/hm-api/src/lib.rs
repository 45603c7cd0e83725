use std::collections::BTreeMap;
use std::sync::Arc;

use hm_compiler::{compile_script, CompiledScript};
use hm_core::{HeroMlError, HmValue};
use hm_runtime::{CompletionProvider, GlobalEnvironment, HeroMlInterpreter, InterpreterOptions};
use tracing::warn;

#[derive(Clone)]
pub struct RunScriptOptions {
    pub source: String,
    pub initial_values: BTreeMap<String, HmValue>,
    pub provider: Arc<dyn CompletionProvider>,
}

#[derive(Debug, Clone)]
pub struct ScriptRun {
    pub compiled: CompiledScript,
    pub environment: GlobalEnvironment,
    pub failure: Option<HeroMlError>,
}

impl ScriptRun {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

pub fn compile_source(source: &str) -> Result<CompiledScript, HeroMlError> {
    compile_script(source)
}

pub fn missing_inputs(required: &[String], supplied: &BTreeMap<String, HmValue>) -> Vec<String> {
    required
        .iter()
        .filter(|name| !supplied.contains_key(*name))
        .cloned()
        .collect()
}

pub fn initial_environment(
    required: &[String],
    supplied: &BTreeMap<String, HmValue>,
) -> GlobalEnvironment {
    let mut values = BTreeMap::new();
    for name in required {
        match supplied.get(name) {
            Some(value) => {
                values.insert(name.clone(), value.clone());
            }
            None => warn!(variable = %name, "no initial value defined"),
        }
    }
    GlobalEnvironment::from_values(values)
}

/// Compiles and interprets `options.source`. Compile failures are returned as
/// `Err`; interpretation failures are reported in `ScriptRun::failure` next to
/// the partial environment.
pub async fn run_script(options: RunScriptOptions) -> Result<ScriptRun, HeroMlError> {
    let compiled = compile_script(&options.source)?;
    Ok(run_compiled(compiled, &options.initial_values, options.provider).await)
}

pub async fn run_compiled(
    compiled: CompiledScript,
    initial_values: &BTreeMap<String, HmValue>,
    provider: Arc<dyn CompletionProvider>,
) -> ScriptRun {
    let mut environment = initial_environment(&compiled.required_inputs(), initial_values);

    let interpreter = HeroMlInterpreter::new(InterpreterOptions { provider });
    let failure = interpreter
        .run(&compiled.ast, &mut environment)
        .await
        .err();

    ScriptRun {
        compiled,
        environment,
        failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_runtime::{EchoProvider, ScriptedProvider};

    fn values(entries: &[(&str, HmValue)]) -> BTreeMap<String, HmValue> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn run_script_greets_with_echo() {
        let run = run_script(RunScriptOptions {
            source: "Say hi to {{name}}".to_string(),
            initial_values: values(&[("name", HmValue::from("Sam"))]),
            provider: Arc::new(EchoProvider),
        })
        .await
        .expect("compile should pass");

        assert!(run.succeeded());
        assert_eq!(
            run.environment.values(),
            &values(&[
                ("name", HmValue::from("Sam")),
                ("step_1", HmValue::from("Say hi to Sam")),
            ])
        );
    }

    #[tokio::test]
    async fn run_script_loops_over_json_list() {
        let run = run_script(RunScriptOptions {
            source: "List {{n}} colors ->>>> ACTION: Loop\nManyItems: TRUE\nForEveryItemDoThis: Describe {{step_1}}"
                .to_string(),
            initial_values: values(&[("n", HmValue::Number(2.0))]),
            provider: Arc::new(ScriptedProvider::new([Some(r#"["red","blue"]"#)])),
        })
        .await
        .expect("compile should pass");

        assert!(run.succeeded());
        let first = run.environment.get("step_2_1").and_then(HmValue::as_string);
        let second = run.environment.get("step_2_2").and_then(HmValue::as_string);
        assert!(first.expect("item 1").contains("red"));
        assert!(second.expect("item 2").contains("blue"));
    }

    #[tokio::test]
    async fn run_script_returns_compile_errors() {
        let error = run_script(RunScriptOptions {
            source: "{{a}} ->>>> {{step_3}}".to_string(),
            initial_values: BTreeMap::new(),
            provider: Arc::new(EchoProvider),
        })
        .await
        .expect_err("invalid script should fail");
        assert_eq!(error.code, "step_2_incorrect_number");
    }

    #[tokio::test]
    async fn run_script_keeps_partial_environment_on_failure() {
        let run = run_script(RunScriptOptions {
            source: "Hi {{name}} ->>>> Use {{step_1}} for {{name}}".to_string(),
            initial_values: BTreeMap::new(),
            provider: Arc::new(EchoProvider),
        })
        .await
        .expect("compile should pass");

        let failure = run.failure.expect("missing input should fail at runtime");
        assert_eq!(failure.code, "ENGINE_VAR_UNDEFINED");
        assert_eq!(failure.step, Some(1));
        assert!(run.environment.is_empty());
    }

    #[test]
    fn initial_values_cover_required_names_only() {
        let required = vec!["topic".to_string(), "tone".to_string()];
        let supplied = values(&[
            ("topic", HmValue::from("SEO")),
            ("extra", HmValue::from("ignored")),
        ]);
        let environment = initial_environment(&required, &supplied);
        assert_eq!(environment.get("topic"), Some(&HmValue::from("SEO")));
        assert!(!environment.contains("extra"));
        assert!(!environment.contains("tone"));
        assert_eq!(missing_inputs(&required, &supplied), vec!["tone"]);
    }

    #[test]
    fn compile_source_exposes_required_inputs() {
        let compiled = compile_source("{{topic}} in a {{tone}} tone").expect("compile");
        assert_eq!(compiled.required_inputs(), vec!["topic", "tone"]);
    }
}
