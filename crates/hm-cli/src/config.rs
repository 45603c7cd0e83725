use std::time::Duration;

use hm_core::HeroMlError;

pub(crate) const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Settings for the chat-completions provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProviderConfig {
    pub(crate) api_key: String,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl ProviderConfig {
    /// Reads `OPENAI_API_KEY` and `HEROML_API_BASE` from the process
    /// environment. `.env` is loaded by the binary before this runs.
    pub(crate) fn from_env(model: &str, timeout_secs: u64) -> Result<Self, HeroMlError> {
        Self::from_lookup(|name| std::env::var(name).ok(), model, timeout_secs)
    }

    pub(crate) fn from_lookup<F>(
        lookup: F,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, HeroMlError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                HeroMlError::new(
                    "CLI_PROVIDER_CONFIG",
                    "OPENAI_API_KEY is not set; export it, add it to .env, or use --provider echo",
                )
            })?;
        let base_url = lookup("HEROML_API_BASE")
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(entries: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn from_lookup_applies_defaults() {
        let config = ProviderConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")]), "gpt-4o", 30)
            .expect("config should load");
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_lookup_honours_base_override() {
        let config = ProviderConfig::from_lookup(
            lookup(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("HEROML_API_BASE", "http://localhost:8080/v1/"),
            ]),
            "gpt-3.5-turbo",
            120,
        )
        .expect("config should load");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn from_lookup_requires_api_key() {
        let error = ProviderConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")]), "m", 1)
            .expect_err("blank key should fail");
        assert_eq!(error.code, "CLI_PROVIDER_CONFIG");
    }
}
