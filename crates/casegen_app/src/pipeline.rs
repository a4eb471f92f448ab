use std::path::PathBuf;
use std::sync::Arc;

use casegen_config::{
    Config, SCENARIOS_OUTPUT, TESTCASES_CLEAN, TESTCASES_ERRORS, TESTCASES_OUTPUT,
};
use casegen_domain::{
    Context, CoverageMetrics, Error, GenerationFailure, GenerationService, Scenario, Session,
    TestCase, parse_scenario_list,
};
use casegen_export::{BUNDLE_FILE, ExportBundle};
use derive_setters::Setters;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::info;

use crate::{ScenarioGenerator, TestCaseGenerator, cleanup, fs};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Scenarios,
    #[strum(serialize = "testcases")]
    TestCases,
    Cleanup,
    Export,
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {error:#}")]
pub struct PipelineError {
    pub stage: Stage,
    pub error: anyhow::Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupReport {
    pub kept: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub test_cases: usize,
    pub files: Vec<PathBuf>,
}

/// Runs the generation stages against files under the configured output
/// directory. Each stage reads the file written by the previous one.
#[derive(Setters)]
#[setters(into)]
pub struct Pipeline<S> {
    #[setters(skip)]
    config: Config,
    #[setters(skip)]
    services: Arc<S>,
    /// Number of scenarios to request
    count: usize,
    temperature: f64,
    context_path: PathBuf,
    /// Also write a zip with every export
    bundle: bool,
}

impl<S: GenerationService> Pipeline<S> {
    pub fn new(config: Config, services: Arc<S>) -> Self {
        Self {
            count: config.default_num_scenarios,
            temperature: config.temperature,
            context_path: config.context_path(),
            bundle: false,
            config,
            services,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn load_context(&self) -> anyhow::Result<Context> {
        let path = &self.context_path;
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(Error::MissingContextFile(path.clone()).into());
        }
        let text = fs::read_text(path).await?;
        Ok(Context::parse(text)?)
    }

    async fn load_scenarios(&self) -> anyhow::Result<Vec<Scenario>> {
        let text = fs::read_text(&self.config.output_path(SCENARIOS_OUTPUT)).await?;
        Ok(parse_scenario_list(&text)?)
    }

    /// Generates scenarios from the context file and writes them one per line.
    pub async fn scenarios(&self) -> anyhow::Result<Vec<Scenario>> {
        let context = self.load_context().await?;
        let count = self.config.scenario_range().check(self.count)?;

        let scenarios = ScenarioGenerator::new(self.services.clone())
            .generate(&context, count, self.temperature)
            .await?;

        let path = self.config.output_path(SCENARIOS_OUTPUT);
        let text = scenarios.iter().map(Scenario::as_str).collect::<Vec<_>>().join("\n");
        fs::write_text(&path, text).await?;
        info!(path = %path.display(), count = scenarios.len(), "Scenarios saved");

        Ok(scenarios)
    }

    /// Generates one test case per saved scenario. Failed scenarios are
    /// written to their own file instead of aborting the stage.
    pub async fn test_cases(&self) -> anyhow::Result<Session> {
        let context = self.load_context().await?;
        let scenarios = self.load_scenarios().await?;
        if scenarios.is_empty() {
            return Err(Error::EmptyResult("scenarios").into());
        }

        let mut session = Session::new(context).with_scenarios(scenarios);
        TestCaseGenerator::new(self.services.clone())
            .generate_for_session(&mut session, self.temperature)
            .await;

        let path = self.config.output_path(TESTCASES_OUTPUT);
        fs::write_json(&path, &session.test_cases).await?;
        fs::write_json(&self.config.output_path(TESTCASES_ERRORS), &session.failures).await?;
        info!(
            path = %path.display(),
            generated = session.test_cases.len(),
            failed = session.failures.len(),
            "Raw test cases saved"
        );

        Ok(session)
    }

    /// Drops records without a title from the raw test cases.
    pub async fn cleanup(&self) -> anyhow::Result<CleanupReport> {
        let raw: Vec<Value> = fs::read_json(&self.config.output_path(TESTCASES_OUTPUT)).await?;
        let total = raw.len();
        let clean = cleanup(raw);

        let path = self.config.output_path(TESTCASES_CLEAN);
        fs::write_json(&path, &clean).await?;
        let report = CleanupReport { kept: clean.len(), dropped: total - clean.len() };
        info!(path = %path.display(), kept = report.kept, dropped = report.dropped, "Clean test cases saved");

        Ok(report)
    }

    /// Writes JSON, CSV and Markdown exports of the cleaned test cases.
    pub async fn export(&self) -> anyhow::Result<ExportReport> {
        let records: Vec<Value> = fs::read_json(&self.config.output_path(TESTCASES_CLEAN)).await?;
        let bundle = ExportBundle::from_records(&records)?;
        let dir = self.config.exports_dir();

        let mut files = Vec::new();
        for (name, contents) in bundle.files() {
            let path = dir.join(name);
            fs::write_text(&path, contents).await?;
            info!(path = %path.display(), "Exported");
            files.push(path);
        }

        if self.bundle {
            let path = dir.join(BUNDLE_FILE);
            fs::write_text(&path, bundle.to_zip()?).await?;
            info!(path = %path.display(), "Bundle written");
            files.push(path);
        }

        Ok(ExportReport { test_cases: records.len(), files })
    }

    /// Coverage numbers for the cleaned test cases.
    pub async fn metrics(&self) -> anyhow::Result<CoverageMetrics> {
        let records: Vec<Value> = fs::read_json(&self.config.output_path(TESTCASES_CLEAN)).await?;
        let cases = TestCase::from_records(&records)?;
        Ok(CoverageMetrics::from_cases(&cases))
    }

    /// Failures recorded by the last test case stage.
    pub async fn failures(&self) -> anyhow::Result<Vec<GenerationFailure>> {
        fs::read_json(&self.config.output_path(TESTCASES_ERRORS)).await
    }

    pub async fn improve(&self, scenario: &str) -> anyhow::Result<Scenario> {
        let context = self.load_context().await?;
        let scenario = Scenario::edited(scenario)?;
        ScenarioGenerator::new(self.services.clone())
            .improve(&context, &scenario, self.temperature)
            .await
    }

    pub async fn run_stage(&self, stage: Stage) -> anyhow::Result<()> {
        match stage {
            Stage::Scenarios => self.scenarios().await.map(|_| ()),
            Stage::TestCases => self.test_cases().await.map(|_| ()),
            Stage::Cleanup => self.cleanup().await.map(|_| ()),
            Stage::Export => self.export().await.map(|_| ()),
        }
    }

    /// Runs every stage in order, stopping at the first failure. Files
    /// written by earlier stages are left in place.
    pub async fn run(&self) -> Result<(), PipelineError> {
        for stage in Stage::iter() {
            info!(%stage, "Starting stage");
            self.run_stage(stage)
                .await
                .map_err(|error| PipelineError { stage, error })?;
            info!(%stage, "Stage completed");
        }
        Ok(())
    }
}
