use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hm_core::HeroMlError;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, HeroMlError>;

    fn name(&self) -> &str {
        "provider"
    }
}

/// Returns the prompt unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoProvider;

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn complete(&self, prompt: &str) -> Result<String, HeroMlError> {
        Ok(prompt.to_string())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

/// Replays queued responses in order and echoes once the queue is drained.
/// A queued `None` answers with a provider failure.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|response| response.map(Into::into))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String, HeroMlError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self
            .responses
            .lock()
            .map_err(|_| HeroMlError::new("PROVIDER_POISONED", "Response queue lock poisoned."))?
            .pop_front();
        match next {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(HeroMlError::new(
                "PROVIDER_FAILED",
                "Scripted provider failure.",
            )),
            None => Ok(prompt.to_string()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod provider_tests {
    use super::*;

    #[tokio::test]
    async fn echo_returns_prompt() {
        let reply = EchoProvider.complete("hello").await.expect("echo");
        assert_eq!(reply, "hello");
    }

    #[tokio::test]
    async fn scripted_replays_then_echoes() {
        let provider = ScriptedProvider::new([Some("first"), None]);
        assert_eq!(provider.complete("a").await.expect("first"), "first");
        let failure = provider.complete("b").await.expect_err("second fails");
        assert_eq!(failure.code, "PROVIDER_FAILED");
        assert_eq!(provider.complete("c").await.expect("echo"), "c");
        assert_eq!(provider.prompts(), vec!["a", "b", "c"]);
    }
}
