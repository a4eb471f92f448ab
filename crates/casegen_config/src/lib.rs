mod config;
mod retry_config;

pub use self::config::*;
pub use retry_config::*;
