use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use casegen_app::{Pipeline, Stage};
use casegen_config::Config;
use casegen_domain::{Error, GenerationRequest, GenerationService};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

const CONTEXT: &str = "Users can reset their password via email link.";
const SCENARIOS: &str = "1. Scenario A\n2. Scenario B\n3. Scenario C";

fn record() -> Value {
    json!({
        "title": "T",
        "custom_preconds": "P",
        "priority_id": 1,
        "custom_steps_separated": [{"content": "c", "expected": "e"}]
    })
}

/// Answers scenario prompts with a fixed list and JSON prompts with a fixed
/// record, except for the JSON calls listed in `fail_on` (1-based).
#[derive(Default)]
struct MockGenerator {
    requests: Mutex<Vec<GenerationRequest>>,
    fail_on: Vec<usize>,
}

impl MockGenerator {
    fn failing_on(fail_on: Vec<usize>) -> Self {
        Self { fail_on, ..Default::default() }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl GenerationService for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> anyhow::Result<String> {
        let mut requests = self.requests.lock().unwrap();
        let json_output = request.json_output;
        requests.push(request);

        if !json_output {
            return Ok(SCENARIOS.to_string());
        }
        let nth = requests.iter().filter(|r| r.json_output).count();
        if self.fail_on.contains(&nth) {
            anyhow::bail!("quota exceeded");
        }
        Ok(record().to_string())
    }
}

struct Fixture {
    _dir: TempDir,
    config: Config,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let vars = [
            ("CASEGEN_OUTPUT_DIR", dir.path().join("outputs")),
            ("CASEGEN_SAMPLES_DIR", dir.path().join("samples")),
        ];
        let mut env: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.display().to_string()))
            .collect();
        env.insert("CASEGEN_MIN_SCENARIOS".to_string(), "1".to_string());
        let config = Config::from_source(Some(env)).unwrap();
        Self { _dir: dir, config }
    }

    fn with_context(self, text: &str) -> Self {
        let path = self.config.context_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
        self
    }

    fn pipeline(&self, services: Arc<MockGenerator>) -> Pipeline<MockGenerator> {
        Pipeline::new(self.config.clone(), services).count(3usize).temperature(0.2)
    }

    fn output(&self, name: &str) -> String {
        std::fs::read_to_string(self.config.output_dir.join(name)).unwrap()
    }

    fn output_json(&self, name: &str) -> Value {
        serde_json::from_str(&self.output(name)).unwrap()
    }

    fn exists(&self, name: &str) -> bool {
        self.config.output_dir.join(name).exists()
    }
}

#[tokio::test]
async fn test_end_to_end_password_reset() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let services = Arc::new(MockGenerator::default());

    fixture.pipeline(services.clone()).run().await.unwrap();

    assert_eq!(fixture.output("generated_scenarios.txt"), SCENARIOS);
    assert_eq!(fixture.output_json("testcases_output.json"), json!([record(), record(), record()]));
    assert_eq!(fixture.output_json("testcases_errors.json"), json!([]));
    assert_eq!(fixture.output_json("testcases_clean.json"), json!([record(), record(), record()]));
    assert_eq!(fixture.output_json("exports/testcases.json"), json!([record(), record(), record()]));
    assert!(fixture.output("exports/testcases.md").contains("- c → *e*"));
    assert!(fixture.output("exports/testcases.csv").starts_with("Title,Preconditions,Steps"));
    assert!(!fixture.exists("exports/testcases_bundle.zip"));
    assert_eq!(services.request_count(), 4);
}

#[tokio::test]
async fn test_prompts_carry_context_and_scenario() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let services = Arc::new(MockGenerator::default());

    fixture.pipeline(services.clone()).run().await.unwrap();

    let requests = services.requests.lock().unwrap();
    assert!(requests[0].prompt.contains(CONTEXT));
    assert!(requests[0].prompt.contains("Generate 3 "));
    assert!(requests[2].prompt.contains("\"\"\"2. Scenario B\"\"\""));
    assert!(requests.iter().all(|r| r.temperature == Some(0.2)));
}

#[tokio::test]
async fn test_missing_context_halts_pipeline() {
    let fixture = Fixture::new();
    let services = Arc::new(MockGenerator::default());

    let actual = fixture.pipeline(services.clone()).run().await.unwrap_err();

    assert_eq!(actual.stage, Stage::Scenarios);
    assert!(matches!(actual.error.downcast_ref::<Error>(), Some(Error::MissingContextFile(_))));
    assert_eq!(services.request_count(), 0);
    assert!(!fixture.exists("generated_scenarios.txt"));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_generation() {
    let fixture = Fixture::new().with_context("too short");
    let services = Arc::new(MockGenerator::default());

    let actual = fixture.pipeline(services.clone()).scenarios().await.unwrap_err();
    assert!(matches!(actual.downcast_ref::<Error>(), Some(Error::ContextTooShort { .. })));

    let fixture = Fixture::new().with_context(CONTEXT);
    let actual = fixture
        .pipeline(services.clone())
        .count(31usize)
        .scenarios()
        .await
        .unwrap_err();
    assert!(matches!(
        actual.downcast_ref::<Error>(),
        Some(Error::ScenarioCountOutOfRange { count: 31, min: 1, max: 30 })
    ));

    assert_eq!(services.request_count(), 0);
}

#[tokio::test]
async fn test_failed_scenarios_do_not_abort_batch() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let services = Arc::new(MockGenerator::failing_on(vec![2]));

    fixture.pipeline(services).run().await.unwrap();

    assert_eq!(fixture.output_json("testcases_output.json"), json!([record(), record()]));
    let failures = fixture.output_json("testcases_errors.json");
    assert_eq!(failures[0]["scenario"], json!("2. Scenario B"));
    assert!(failures[0]["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_export_fails_on_title_only_record() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let pipeline = fixture.pipeline(Arc::new(MockGenerator::default()));
    let raw = json!([{"title": "only a title"}, {"x": 1}, "bad"]);
    std::fs::create_dir_all(&fixture.config.output_dir).unwrap();
    std::fs::write(fixture.config.output_dir.join("testcases_output.json"), raw.to_string())
        .unwrap();

    let report = pipeline.cleanup().await.unwrap();
    assert_eq!((report.kept, report.dropped), (1, 2));
    assert_eq!(fixture.output_json("testcases_clean.json"), json!([{"title": "only a title"}]));

    let actual = pipeline.run_stage(Stage::Export).await.unwrap_err();
    assert!(matches!(
        actual.downcast_ref::<Error>(),
        Some(Error::MalformedRecord { index: 0, .. })
    ));
}

#[tokio::test]
async fn test_bundle_and_metrics() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let pipeline = fixture.pipeline(Arc::new(MockGenerator::default())).bundle(true);

    pipeline.run().await.unwrap();

    assert!(fixture.exists("exports/testcases_bundle.zip"));
    let metrics = pipeline.metrics().await.unwrap();
    assert_eq!(metrics.test_cases, 3);
    assert_eq!(metrics.total_steps, 3);
    assert_eq!(metrics.coverage_score, 9.0);
    assert!(pipeline.failures().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stage_requires_previous_output() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let pipeline = fixture.pipeline(Arc::new(MockGenerator::default()));

    let actual = pipeline.cleanup().await.unwrap_err();
    assert!(actual.to_string().contains("testcases_output.json"));
}

#[tokio::test]
async fn test_edited_scenarios_are_validated_before_generation() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let services = Arc::new(MockGenerator::default());
    std::fs::create_dir_all(&fixture.config.output_dir).unwrap();
    std::fs::write(
        fixture.config.output_dir.join("generated_scenarios.txt"),
        "1. Scenario A\nab\n",
    )
    .unwrap();

    let actual = fixture.pipeline(services.clone()).test_cases().await.unwrap_err();

    assert!(matches!(
        actual.downcast_ref::<Error>(),
        Some(Error::InvalidScenario { line: 2, .. })
    ));
    assert_eq!(services.request_count(), 0);
    assert!(!fixture.exists("testcases_output.json"));
}

#[tokio::test]
async fn test_export_accepts_any_priority_value() {
    let fixture = Fixture::new().with_context(CONTEXT);
    let pipeline = fixture.pipeline(Arc::new(MockGenerator::default()));
    let mut float_priority = record();
    float_priority["priority_id"] = json!(2.0);
    let mut no_priority = record();
    no_priority.as_object_mut().unwrap().remove("priority_id");
    let clean = json!([float_priority, {"priority_id": true, "title": "B", "custom_preconds": "P", "custom_steps_separated": []}, no_priority]);
    std::fs::create_dir_all(&fixture.config.output_dir).unwrap();
    std::fs::write(fixture.config.output_dir.join("testcases_clean.json"), clean.to_string())
        .unwrap();

    let report = pipeline.export().await.unwrap();

    assert_eq!(report.test_cases, 3);
    assert_eq!(fixture.output_json("exports/testcases.json"), clean);
    assert!(fixture.output("exports/testcases.md").contains("## B\n"));
    assert_eq!(pipeline.metrics().await.unwrap().total_steps, 2);
}
