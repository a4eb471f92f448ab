/// Non-success response from the generation API.
#[derive(Debug, thiserror::Error)]
#[error("Generation API returned {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}
