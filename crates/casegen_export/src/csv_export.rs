use anyhow::Context as _;
use casegen_domain::{Step, TestCase};

const HEADER: [&str; 3] = ["Title", "Preconditions", "Steps"];

/// Renders one row per test case. All steps share a single cell, one
/// `<n>. <content> → <expected>` line each.
pub fn to_csv(cases: &[TestCase]) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for case in cases {
        let steps = steps_cell(&case.custom_steps_separated);
        writer.write_record([case.title.as_str(), case.custom_preconds.as_str(), steps.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn steps_cell(steps: &[Step]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {} → {}", i + 1, step.content, step.expected))
        .collect::<Vec<_>>()
        .join("\n")
}
