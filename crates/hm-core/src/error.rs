use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct HeroMlError {
    pub code: String,
    pub message: String,
    pub step: Option<usize>,
}

impl HeroMlError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            step: None,
        }
    }

    pub fn at_step(code: impl Into<String>, message: impl Into<String>, step: usize) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            step: Some(step),
        }
    }
}
