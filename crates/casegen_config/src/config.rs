use std::path::{Path, PathBuf};

use casegen_domain::ScenarioRange;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::RetryConfig;

/// Raw scenarios, one per line.
pub const SCENARIOS_OUTPUT: &str = "generated_scenarios.txt";
/// Raw test cases, one element per successfully parsed scenario.
pub const TESTCASES_OUTPUT: &str = "testcases_output.json";
/// Scenarios whose test case could not be generated.
pub const TESTCASES_ERRORS: &str = "testcases_errors.json";
/// Test cases that passed cleanup.
pub const TESTCASES_CLEAN: &str = "testcases_clean.json";

const EXPORTS_DIR: &str = "exports";

#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
pub struct Config {
    /// Generation model identifier
    pub model: String,
    /// Default sampling temperature
    pub temperature: f64,
    /// Scenario count used when none is given
    pub default_num_scenarios: usize,
    pub min_scenarios: usize,
    pub max_scenarios: usize,
    /// Base URL of the generation API
    pub base_url: Url,
    /// Per-request timeout; the HTTP client default applies when unset
    #[serde(default)]
    #[setters(strip_option)]
    pub request_timeout_secs: Option<u64>,
    /// Directory all pipeline outputs are written to
    pub output_dir: PathBuf,
    /// Directory holding input samples
    pub samples_dir: PathBuf,
    /// Context file name, relative to `samples_dir`
    pub context_file: String,
    pub retry: RetryConfig,
}

impl Config {
    /// Loads configuration from the embedded defaults, overridden by
    /// `CASEGEN_`-prefixed environment variables. A `.env` file in the
    /// working directory is loaded first if present.
    ///
    /// Nested keys use a double underscore:
    /// - `CASEGEN_MODEL` -> `model`
    /// - `CASEGEN_MAX_SCENARIOS` -> `max_scenarios`
    /// - `CASEGEN_RETRY__MAX_RETRY_ATTEMPTS` -> `retry.max_retry_attempts`
    pub fn from_env() -> Result<Self, config::ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_source(None)
    }

    /// Same as [`Config::from_env`] but reads variables from `source` instead
    /// of the process environment when given.
    pub fn from_source(
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        const DEFAULT_CONFIG: &str = include_str!("../defaults.json");

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Json))
            .add_source(
                config::Environment::with_prefix("CASEGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(source),
            )
            .build()?
            .try_deserialize()
    }

    pub fn scenario_range(&self) -> ScenarioRange {
        ScenarioRange::new(self.min_scenarios, self.max_scenarios)
    }

    pub fn context_path(&self) -> PathBuf {
        self.samples_dir.join(&self.context_file)
    }

    pub fn output_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.output_dir.join(EXPORTS_DIR)
    }
}
