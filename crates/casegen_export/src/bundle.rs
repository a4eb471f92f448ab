use std::io::{Cursor, Write};

use anyhow::Context as _;
use casegen_domain::TestCase;
use serde_json::Value;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::{to_csv, to_markdown, to_pretty_json};

pub const JSON_FILE: &str = "testcases.json";
pub const CSV_FILE: &str = "testcases.csv";
pub const MARKDOWN_FILE: &str = "testcases.md";
pub const SUMMARY_FILE: &str = "summary.txt";
pub const BUNDLE_FILE: &str = "testcases_bundle.zip";

/// Every export representation of one batch of cleaned test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub json: String,
    pub csv: String,
    pub markdown: String,
    pub summary: String,
}

impl ExportBundle {
    /// JSON is a verbatim dump of `records`. CSV and Markdown need the typed
    /// shape, so a record missing `custom_preconds` or
    /// `custom_steps_separated` fails the whole export.
    pub fn from_records(records: &[Value]) -> anyhow::Result<Self> {
        let json = to_pretty_json(records).context("Failed to serialize test cases")?;
        let cases = TestCase::from_records(records)?;

        Ok(Self {
            json,
            csv: to_csv(&cases)?,
            markdown: to_markdown(&cases),
            summary: format!("Generated {} testcases.", cases.len()),
        })
    }

    /// File name and contents for each representation.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (JSON_FILE, self.json.as_str()),
            (CSV_FILE, self.csv.as_str()),
            (MARKDOWN_FILE, self.markdown.as_str()),
        ]
    }

    /// Packs all representations plus a summary into a zip archive.
    pub fn to_zip(&self) -> anyhow::Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let entries = self
            .files()
            .into_iter()
            .chain([(SUMMARY_FILE, self.summary.as_str())]);
        for (name, contents) in entries {
            zip.start_file(name, options)
                .with_context(|| format!("Failed to add {name} to bundle"))?;
            zip.write_all(contents.as_bytes())?;
        }

        Ok(zip.finish().context("Failed to finish bundle")?.into_inner())
    }
}
