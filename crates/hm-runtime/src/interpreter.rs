use std::sync::Arc;

use hm_core::{
    loop_output_key, step_output_key, AstNode, HeroMlError, HmValue, LoopSpec, NodeContent,
    NodeKind,
};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::{render_prompt, CompletionProvider, GlobalEnvironment, LocalEnvironment};

#[derive(Clone)]
pub struct InterpreterOptions {
    pub provider: Arc<dyn CompletionProvider>,
}

pub struct HeroMlInterpreter {
    provider: Arc<dyn CompletionProvider>,
}

impl HeroMlInterpreter {
    pub fn new(options: InterpreterOptions) -> Self {
        Self {
            provider: options.provider,
        }
    }

    /// Evaluates `nodes` in order against `environment`. On error the outputs
    /// committed so far stay in `environment`.
    pub async fn run(
        &self,
        nodes: &[AstNode],
        environment: &mut GlobalEnvironment,
    ) -> Result<(), HeroMlError> {
        for (offset, node) in nodes.iter().enumerate() {
            let step = offset + 1;
            debug!(step, kind = node.kind.name(), "processing node");

            let text = match &node.content {
                NodeContent::Leaf(text) => text.as_str(),
                NodeContent::Branch(_) => {
                    return Err(node_error(
                        "ENGINE_NODE_CONTENT_UNSUPPORTED",
                        "content must be a single templated text",
                        step,
                        node,
                    ));
                }
            };

            match &node.kind {
                NodeKind::Default => self.eval_default(node, text, step, environment).await?,
                NodeKind::Loop(spec) => {
                    self.eval_loop(node, spec, text, step, environment).await?
                }
            }
        }
        Ok(())
    }

    async fn eval_default(
        &self,
        node: &AstNode,
        text: &str,
        step: usize,
        environment: &mut GlobalEnvironment,
    ) -> Result<(), HeroMlError> {
        let prompt = render_prompt(text, environment, None)
            .map_err(|error| with_node_context(error, step, node))?;
        let key = step_output_key(step);
        if let Some(output) = self.request(&prompt, &key).await {
            environment
                .commit(key.clone(), HmValue::String(output))
                .map_err(|error| with_node_context(error, step, node))?;
            info!(key = %key, "committed step output");
        }
        Ok(())
    }

    async fn eval_loop(
        &self,
        node: &AstNode,
        spec: &LoopSpec,
        text: &str,
        step: usize,
        environment: &mut GlobalEnvironment,
    ) -> Result<(), HeroMlError> {
        let Some(source) = spec.referenced_source.as_deref() else {
            return Err(node_error(
                "ENGINE_LOOP_SOURCE_MISSING",
                "loop does not name a source list",
                step,
                node,
            ));
        };
        let Some(value) = environment.get(source) else {
            return Err(node_error(
                "ENGINE_LOOP_SOURCE_MISSING",
                &format!("loop source \"{}\" has no value", source),
                step,
                node,
            ));
        };
        let items = loop_items(value).ok_or_else(|| {
            node_error(
                "ENGINE_LOOP_SOURCE_NOT_ARRAY",
                &format!(
                    "loop source \"{}\" is a {}, not an array",
                    source,
                    value.type_name()
                ),
                step,
                node,
            )
        })?;

        debug!(
            step,
            source,
            items = items.len(),
            aggregate_responses = spec.aggregate_responses,
            "expanding loop"
        );

        let binding = node.declared_variables.first();
        for (item_offset, item) in items.into_iter().enumerate() {
            let mut local = LocalEnvironment::new();
            if let Some(name) = binding {
                local.bind(name.clone(), HmValue::from(item.clone()));
            }

            let rendered = render_prompt(text, environment, Some(&local))
                .map_err(|error| with_node_context(error, step, node))?;
            let prompt = format!("{} \n{}", rendered, item);

            let key = loop_output_key(step, item_offset + 1);
            if let Some(output) = self.request(&prompt, &key).await {
                environment
                    .commit(key.clone(), HmValue::String(output))
                    .map_err(|error| with_node_context(error, step, node))?;
                info!(key = %key, "committed loop item output");
            }
        }
        Ok(())
    }

    async fn request(&self, prompt: &str, key: &str) -> Option<String> {
        debug!(key, provider = self.provider.name(), prompt, "sending prompt");
        match self.provider.complete(prompt).await {
            Ok(output) if output.is_empty() => {
                warn!(key, "provider returned an empty response; leaving output unset");
                None
            }
            Ok(output) => Some(output),
            Err(error) => {
                warn!(key, error = %error, "provider call failed; leaving output unset");
                None
            }
        }
    }
}

/// Items stay as JSON so each one is appended to its prompt exactly as it was listed.
fn loop_items(value: &HmValue) -> Option<Vec<JsonValue>> {
    if let Some(items) = value.as_array() {
        return Some(items.iter().map(HmValue::to_json).collect());
    }
    match serde_json::from_str::<JsonValue>(value.as_string()?.trim()) {
        Ok(JsonValue::Array(items)) => Some(items),
        _ => None,
    }
}

fn node_error(code: &str, detail: &str, step: usize, node: &AstNode) -> HeroMlError {
    HeroMlError::at_step(
        code,
        format!("{} node at step {}: {}.", node.kind.name(), step, detail),
        step,
    )
}

fn with_node_context(error: HeroMlError, step: usize, node: &AstNode) -> HeroMlError {
    HeroMlError::at_step(
        error.code,
        format!("{} node at step {}: {}", node.kind.name(), step, error.message),
        step,
    )
}
