use serde_json::Value;

use crate::{Context, GenerationFailure, Scenario};

/// State of one generation run, handed explicitly from step to step.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub context: Context,
    pub scenarios: Vec<Scenario>,
    /// Raw records in scenario order, malformed entries included.
    pub test_cases: Vec<Value>,
    pub failures: Vec<GenerationFailure>,
}

impl Session {
    pub fn new(context: Context) -> Self {
        Self { context, scenarios: Vec::new(), test_cases: Vec::new(), failures: Vec::new() }
    }

    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn record_test_case(&mut self, record: Value) {
        self.test_cases.push(record);
    }

    pub fn record_failure(&mut self, failure: GenerationFailure) {
        self.failures.push(failure);
    }
}
