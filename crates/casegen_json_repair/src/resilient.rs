use serde::Deserialize;

use crate::{JsonRepairError, salvage};

/// Which parse attempt produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole text was valid JSON.
    Strict,
    /// Only the brace-delimited span extracted from the text parsed.
    Salvaged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub strategy: ParseStrategy,
}

impl<T> Parsed<T> {
    pub fn is_salvaged(&self) -> bool {
        self.strategy == ParseStrategy::Salvaged
    }
}

/// Deserializes JSON from model output: a strict parse of the whole text,
/// then a salvage parse of the first `{` .. last `}` span.
pub fn from_str<T>(s: &str) -> Result<Parsed<T>, JsonRepairError>
where
    T: for<'de> Deserialize<'de>,
{
    let strict = match serde_json::from_str::<T>(s) {
        Ok(value) => return Ok(Parsed { value, strategy: ParseStrategy::Strict }),
        Err(e) => e,
    };

    tracing::warn!(error = %strict, "Strict JSON parse failed, attempting salvage");

    let Some(span) = salvage(s) else {
        tracing::error!("No brace-delimited object found in response");
        return Err(JsonRepairError::NoJsonObject { strict });
    };

    serde_json::from_str::<T>(span)
        .map(|value| {
            tracing::info!("JSON salvage successful");
            Parsed { value, strategy: ParseStrategy::Salvaged }
        })
        .map_err(|salvage| {
            tracing::error!(error = %salvage, "JSON salvage failed");
            JsonRepairError::SalvageFailed { strict, salvage }
        })
}
