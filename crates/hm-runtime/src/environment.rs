use std::collections::BTreeMap;

use hm_core::{HeroMlError, HmValue};
use serde::{Deserialize, Serialize};

/// Script-wide values: initial inputs plus every committed step output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalEnvironment {
    values: BTreeMap<String, HmValue>,
}

impl GlobalEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: BTreeMap<String, HmValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&HmValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &BTreeMap<String, HmValue> {
        &self.values
    }

    /// The only write path for step outputs. Keys are never overwritten.
    pub fn commit(&mut self, key: String, value: HmValue) -> Result<(), HeroMlError> {
        if self.values.contains_key(&key) {
            return Err(HeroMlError::new(
                "ENGINE_OUTPUT_DUPLICATE",
                format!("Output key \"{}\" is already bound.", key),
            ));
        }
        self.values.insert(key, value);
        Ok(())
    }
}

/// Bindings for a single loop iteration. Dropped when the iteration ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalEnvironment {
    values: BTreeMap<String, HmValue>,
}

impl LocalEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: HmValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&HmValue> {
        self.values.get(name)
    }
}
