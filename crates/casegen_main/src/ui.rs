use anyhow::Result;
use casegen_app::Pipeline;
use casegen_domain::{CoverageMetrics, GenerationFailure, GenerationService};
use colored::Colorize;

use crate::cli::Command;

pub struct UI<S> {
    pipeline: Pipeline<S>,
}

impl<S: GenerationService> UI<S> {
    pub fn new(pipeline: Pipeline<S>) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self, command: Command) -> Result<()> {
        match command {
            Command::Scenarios => {
                let scenarios = self.pipeline.scenarios().await?;
                for scenario in &scenarios {
                    println!("{scenario}");
                }
                success(format!("{} scenarios saved", scenarios.len()));
            }
            Command::TestCases => {
                let session = self.pipeline.test_cases().await?;
                success(format!("{} test cases generated", session.test_cases.len()));
                display_failures(&session.failures);
            }
            Command::Cleanup => {
                let report = self.pipeline.cleanup().await?;
                success(format!(
                    "{} test cases kept, {} dropped",
                    report.kept, report.dropped
                ));
            }
            Command::Export { .. } => self.export().await?,
            Command::Improve { scenario } => {
                let improved = self.pipeline.improve(&scenario).await?;
                println!("{improved}");
            }
            Command::Metrics => display_metrics(&self.pipeline.metrics().await?),
            Command::Run { .. } => {
                self.pipeline.run().await?;
                display_failures(&self.pipeline.failures().await?);
                display_metrics(&self.pipeline.metrics().await?);
                success(format!(
                    "Pipeline completed, outputs in {}",
                    self.pipeline.config().output_dir.display()
                ));
            }
        }
        Ok(())
    }

    async fn export(&self) -> Result<()> {
        let report = self.pipeline.export().await?;
        for path in &report.files {
            println!("  {}", path.display());
        }
        success(format!("{} test cases exported", report.test_cases));
        Ok(())
    }
}

fn success(message: String) {
    println!("{} {}", "✓".green(), message);
}

fn display_failures(failures: &[GenerationFailure]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{}", format!("{} scenarios failed:", failures.len()).yellow().bold());
    for failure in failures {
        eprintln!("  {} {}: {}", "✗".red(), failure.scenario, failure.error);
    }
}

fn display_metrics(metrics: &CoverageMetrics) {
    println!("\n{}", "Coverage:".bold().underline());
    println!("  {}: {}", "Test cases".bold(), metrics.test_cases);
    println!("  {}: {}", "Total steps".bold(), metrics.total_steps);
    println!("  {}: {:.1}", "Average steps".bold(), metrics.average_steps);
    println!("  {}: {:.0}%", "Coverage score".bold(), metrics.coverage_score);
    println!();
}
