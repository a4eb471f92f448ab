use std::path::PathBuf;

use casegen_json_repair::JsonRepairError;

use crate::Scenario;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Context cannot be empty")]
    EmptyContext,

    #[error("Context is too short ({length} characters). Add at least one full sentence")]
    ContextTooShort { length: usize },

    #[error("Context is too long ({length} characters, limit is {max})")]
    ContextTooLong { length: usize, max: usize },

    #[error("Number of scenarios must be between {min} and {max}, got {count}")]
    ScenarioCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("Scenario text cannot be empty")]
    EmptyScenario,

    #[error("Scenario is too short. Add more detail")]
    ScenarioTooShort,

    #[error("Scenario on line {line} is invalid: {source}")]
    InvalidScenario { line: usize, source: Box<Error> },

    #[error("Context file not found: {}", .0.display())]
    MissingContextFile(PathBuf),

    #[error("The model returned no {0}")]
    EmptyResult(&'static str),

    #[error("Invalid JSON returned for scenario '{scenario}': {source}")]
    InvalidResponse {
        scenario: Scenario,
        source: JsonRepairError,
    },

    #[error("Test case #{index} cannot be exported: {source}")]
    MalformedRecord {
        index: usize,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Retryable(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
