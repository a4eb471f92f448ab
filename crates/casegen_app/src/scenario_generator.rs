use std::sync::Arc;

use casegen_domain::{Context, Error, GenerationRequest, GenerationService, Scenario};
use tracing::{debug, info};

use crate::prompts;

/// Keeps the lines of `text` that start with a digit (any script), trimmed and in order.
/// The numbering itself is part of the scenario text.
pub fn parse_scenarios(text: &str) -> Vec<Scenario> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(char::is_numeric))
        .map(Scenario::from)
        .collect()
}

/// First stage: asks the model for a numbered list of scenarios.
pub struct ScenarioGenerator<S> {
    services: Arc<S>,
}

impl<S: GenerationService> ScenarioGenerator<S> {
    pub fn new(services: Arc<S>) -> Self {
        Self { services }
    }

    pub async fn generate(
        &self,
        context: &Context,
        count: usize,
        temperature: f64,
    ) -> anyhow::Result<Vec<Scenario>> {
        let prompt = prompts::scenarios(context, count)?;
        let text = self
            .services
            .generate(GenerationRequest::new(prompt).temperature(temperature))
            .await?;

        let scenarios = parse_scenarios(&text);
        if scenarios.is_empty() {
            debug!(response = %text, "No numbered lines in response");
            return Err(Error::EmptyResult("scenarios").into());
        }

        info!(requested = count, received = scenarios.len(), "Generated scenarios");
        Ok(scenarios)
    }

    /// Rewrites one scenario into a clearer single sentence.
    pub async fn improve(
        &self,
        context: &Context,
        scenario: &Scenario,
        temperature: f64,
    ) -> anyhow::Result<Scenario> {
        let prompt = prompts::improve_scenario(context, scenario)?;
        let text = self
            .services
            .generate(GenerationRequest::new(prompt).temperature(temperature))
            .await?;

        let improved = text.trim();
        if improved.is_empty() {
            return Err(Error::EmptyResult("improved scenario").into());
        }
        Ok(Scenario::new(improved))
    }
}
