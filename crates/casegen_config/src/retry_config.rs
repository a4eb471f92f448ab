use derive_setters::Setters;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Setters, PartialEq)]
#[setters(into)]
pub struct RetryConfig {
    /// Minimum delay in milliseconds between retry attempts
    pub min_delay_ms: u64,

    /// Backoff multiplication factor for each retry attempt
    pub backoff_factor: u64,

    /// Maximum number of retry attempts
    pub max_retry_attempts: usize,

    /// HTTP status codes that should trigger retries (e.g., 429, 500, 502, 503,
    /// 504)
    pub retry_status_codes: Vec<u16>,

    /// Maximum delay between retries in seconds
    #[serde(default)]
    pub max_delay: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            backoff_factor: 2,
            max_retry_attempts: 2,
            retry_status_codes: vec![408, 429, 500, 502, 503, 504],
            max_delay: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_retry_config_setters() {
        let config = RetryConfig::default()
            .min_delay_ms(5u64)
            .max_retry_attempts(4usize)
            .retry_status_codes(vec![503]);

        assert_eq!(config.min_delay_ms, 5);
        assert_eq!(config.backoff_factor, 2);
        assert_eq!(config.max_retry_attempts, 4);
        assert_eq!(config.retry_status_codes, vec![503]);
    }
}
