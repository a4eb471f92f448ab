use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const MIN_SCENARIO_LEN: usize = 5;

/// A single-sentence QA test intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario(String);

impl Scenario {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Builds a scenario from user-edited text, rejecting blank or trivially
    /// short input.
    pub fn edited(text: impl AsRef<str>) -> Result<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyScenario);
        }
        if trimmed.chars().count() < MIN_SCENARIO_LEN {
            return Err(Error::ScenarioTooShort);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reads a saved, possibly hand-edited scenario list: one scenario per
/// non-blank line. Every line must pass [`Scenario::edited`]; `line` in the
/// error is 1-based.
pub fn parse_scenario_list(text: &str) -> Result<Vec<Scenario>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            Scenario::edited(line)
                .map_err(|source| Error::InvalidScenario { line: index + 1, source: Box::new(source) })
        })
        .collect()
}

impl From<&str> for Scenario {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
