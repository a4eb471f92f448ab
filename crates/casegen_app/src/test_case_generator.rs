use std::sync::Arc;

use casegen_domain::{
    Context, Error, GenerationFailure, GenerationRequest, GenerationService, Scenario, Session,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::prompts;

/// Second stage: one JSON test case per scenario.
pub struct TestCaseGenerator<S> {
    services: Arc<S>,
}

impl<S: GenerationService> TestCaseGenerator<S> {
    pub fn new(services: Arc<S>) -> Self {
        Self { services }
    }

    /// Generates the raw test case record for a single scenario.
    ///
    /// The response is parsed strictly first; if that fails, the first
    /// brace-delimited span is salvaged. The returned value is not validated.
    pub async fn generate(
        &self,
        context: &Context,
        scenario: &Scenario,
        temperature: f64,
    ) -> anyhow::Result<Value> {
        let prompt = prompts::test_case(context, scenario)?;
        let request = GenerationRequest::new(prompt)
            .temperature(temperature)
            .json_output(true);
        let text = self.services.generate(request).await?;

        let parsed = casegen_json_repair::from_str::<Value>(&text).map_err(|source| {
            Error::InvalidResponse { scenario: scenario.clone(), source }
        })?;

        if parsed.is_salvaged() {
            warn!(scenario = %scenario, "Test case recovered by salvage parse");
        }
        Ok(parsed.value)
    }

    /// Generates a test case for every scenario in the session, in order.
    ///
    /// A failed scenario is recorded in `session.failures` and does not stop
    /// the remaining ones. Previous results in the session are replaced.
    pub async fn generate_for_session(&self, session: &mut Session, temperature: f64) {
        session.test_cases.clear();
        session.failures.clear();

        let scenarios = session.scenarios.clone();
        let total = scenarios.len();
        for (index, scenario) in scenarios.into_iter().enumerate() {
            info!(current = index + 1, total, scenario = %scenario, "Generating test case");

            let result = self.generate(&session.context, &scenario, temperature).await;
            match result {
                Ok(record) => session.record_test_case(record),
                Err(error) => {
                    warn!(scenario = %scenario, error = %format!("{error:#}"), "Test case generation failed");
                    session.record_failure(GenerationFailure::new(scenario, &error));
                }
            }
        }
    }
}
