use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Minimum number of characters in a trimmed context.
pub const MIN_CONTEXT_LEN: usize = 10;
/// Upper bound on the raw context length, in characters.
pub const MAX_CONTEXT_LEN: usize = 8000;

/// Free-text description of the feature under test.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(String);

impl Context {
    /// Validates raw user input and keeps its trimmed form.
    pub fn parse(text: impl AsRef<str>) -> Result<Self> {
        let text = text.as_ref();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(Error::EmptyContext);
        }

        let length = trimmed.chars().count();
        if length < MIN_CONTEXT_LEN {
            return Err(Error::ContextTooShort { length });
        }

        let length = text.chars().count();
        if length > MAX_CONTEXT_LEN {
            return Err(Error::ContextTooLong { length, max: MAX_CONTEXT_LEN });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Inclusive bounds on how many scenarios a single request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioRange {
    pub min: usize,
    pub max: usize,
}

impl ScenarioRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn check(&self, count: usize) -> Result<usize> {
        if count < self.min || count > self.max {
            return Err(Error::ScenarioCountOutOfRange { count, min: self.min, max: self.max });
        }
        Ok(count)
    }
}
