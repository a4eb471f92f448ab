mod dto;
mod error;
mod gemini;
mod retry;

pub use error::ApiError;
pub use gemini::*;
pub use retry::{into_retry, retry_with_config};
