use casegen_domain::{Context, Scenario};
use handlebars::{Handlebars, no_escape};
use lazy_static::lazy_static;
use serde_json::json;

const SCENARIOS: &str = "scenarios";
const TEST_CASE: &str = "test_case";
const IMPROVE_SCENARIO: &str = "improve_scenario";

fn create_handlebar() -> Handlebars<'static> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_escape_fn(no_escape);

    let templates = [
        (SCENARIOS, include_str!("templates/scenarios.md")),
        (TEST_CASE, include_str!("templates/test_case.md")),
        (IMPROVE_SCENARIO, include_str!("templates/improve_scenario.md")),
    ];
    for (name, source) in templates {
        hb.register_template_string(name, source)
            .expect("embedded prompt templates are valid");
    }

    hb
}

lazy_static! {
    static ref HANDLEBARS: Handlebars<'static> = create_handlebar();
}

pub fn scenarios(context: &Context, count: usize) -> anyhow::Result<String> {
    Ok(HANDLEBARS.render(SCENARIOS, &json!({ "context": context.as_str(), "count": count }))?)
}

pub fn test_case(context: &Context, scenario: &Scenario) -> anyhow::Result<String> {
    Ok(HANDLEBARS.render(
        TEST_CASE,
        &json!({ "context": context.as_str(), "scenario": scenario.as_str() }),
    )?)
}

pub fn improve_scenario(context: &Context, scenario: &Scenario) -> anyhow::Result<String> {
    Ok(HANDLEBARS.render(
        IMPROVE_SCENARIO,
        &json!({ "context": context.as_str(), "scenario": scenario.as_str() }),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::parse("Users can reset their password via email link.").unwrap()
    }

    #[test]
    fn test_scenarios_prompt() {
        let actual = scenarios(&context(), 3).unwrap();

        assert!(actual.starts_with("Generate 3 high-quality QA test scenarios"));
        assert!(actual.contains("\"\"\"Users can reset their password via email link.\"\"\""));
        assert!(actual.contains("One scenario per line"));
    }

    #[test]
    fn test_test_case_prompt_is_not_html_escaped() {
        let scenario = Scenario::new("1. Verify <script> & \"quotes\" in the email field");
        let actual = test_case(&context(), &scenario).unwrap();

        assert!(actual.contains("\"\"\"1. Verify <script> & \"quotes\" in the email field\"\"\""));
        assert!(actual.contains("\"custom_steps_separated\""));
    }

    #[test]
    fn test_improve_prompt() {
        let actual = improve_scenario(&context(), &Scenario::new("1. reset works")).unwrap();
        assert!(actual.contains("SCENARIO TO IMPROVE:\n\"\"\"1. reset works\"\"\""));
    }
}
