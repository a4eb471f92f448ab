use serde::{Deserialize, Serialize};

use crate::Scenario;

/// A scenario whose test case could not be generated, kept so the batch can
/// continue and the failure can be reported afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    pub scenario: Scenario,
    pub error: String,
}

impl GenerationFailure {
    pub fn new(scenario: Scenario, error: &anyhow::Error) -> Self {
        Self { scenario, error: format!("{error:#}") }
    }
}
