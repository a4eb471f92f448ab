use serde::Serialize;

use crate::TestCase;

/// Summary numbers over a batch of generated test cases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageMetrics {
    pub test_cases: usize,
    pub total_steps: usize,
    pub average_steps: f64,
    /// Rough heuristic: three points per step, capped at 100.
    pub coverage_score: f64,
}

impl CoverageMetrics {
    pub fn from_cases(cases: &[TestCase]) -> Self {
        let test_cases = cases.len();
        let total_steps: usize = cases.iter().map(|tc| tc.custom_steps_separated.len()).sum();
        let average_steps = if test_cases == 0 {
            0.0
        } else {
            total_steps as f64 / test_cases as f64
        };
        let coverage_score = (total_steps as f64 * 3.0).min(100.0);

        Self { test_cases, total_steps, average_steps, coverage_score }
    }
}
