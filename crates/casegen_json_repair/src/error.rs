#[derive(Debug, thiserror::Error)]
pub enum JsonRepairError {
    #[error("Response is not valid JSON: {strict}")]
    NoJsonObject { strict: serde_json::Error },

    #[error("Response is not valid JSON: {strict}; salvaged object is also invalid: {salvage}")]
    SalvageFailed {
        strict: serde_json::Error,
        salvage: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, JsonRepairError>;
