use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the context file describing the feature under test.
    ///
    /// Defaults to `context.txt` inside the configured samples directory.
    #[arg(long, short = 'c', global = true)]
    pub context: Option<PathBuf>,

    /// Directory all stage outputs are written to.
    #[arg(long, short = 'o', global = true)]
    pub output_dir: Option<PathBuf>,

    /// Number of scenarios to request from the model.
    #[arg(long, short = 'n', global = true)]
    pub count: Option<usize>,

    /// Sampling temperature used for every generation call.
    #[arg(long, short = 't', global = true)]
    pub temperature: Option<f64>,

    /// Enable verbose output mode.
    ///
    /// When enabled, request and parsing details are logged at debug level.
    #[arg(long, default_value_t = false, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Generate numbered scenarios from the context
    Scenarios,

    /// Generate one test case per saved scenario
    #[command(name = "testcases")]
    TestCases,

    /// Drop malformed records from the generated test cases
    Cleanup,

    /// Write JSON, CSV and Markdown exports of the clean test cases
    Export {
        /// Also package every export into a zip file
        #[arg(long, default_value_t = false)]
        bundle: bool,
    },

    /// Rewrite a single scenario into a clearer one
    Improve {
        /// Scenario text to improve
        scenario: String,
    },

    /// Show coverage numbers for the clean test cases
    Metrics,

    /// Run every stage in order, stopping at the first failure
    Run {
        /// Also package every export into a zip file
        #[arg(long, default_value_t = false)]
        bundle: bool,
    },
}

impl Command {
    pub fn bundle(&self) -> bool {
        matches!(self, Command::Export { bundle: true } | Command::Run { bundle: true })
    }
}
