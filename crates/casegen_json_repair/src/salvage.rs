use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Greedy and dot-all: spans from the first `{` to the last `}`.
    static ref OBJECT_SPAN: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Extracts the outermost brace-delimited span from free-form text.
///
/// This is lossy: prose before the first `{` and after the last `}` is
/// discarded, and nothing guarantees the span is itself valid JSON.
pub fn salvage(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}
