use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use casegen_config::RetryConfig;
use casegen_domain::Error;

use crate::ApiError;

/// Marks transport failures and retryable status codes as
/// [`Error::Retryable`] so [`retry_with_config`] will try again.
pub fn into_retry(error: anyhow::Error, retry_config: &RetryConfig) -> anyhow::Error {
    if let Some(code) = get_api_status_code(&error).or(get_req_status_code(&error))
        && retry_config.retry_status_codes.contains(&code)
    {
        return Error::Retryable(error).into();
    }

    if is_req_transport_error(&error) {
        return Error::Retryable(error).into();
    }

    error
}

fn get_api_status_code(error: &anyhow::Error) -> Option<u16> {
    error.downcast_ref::<ApiError>().map(|error| error.status)
}

fn get_req_status_code(error: &anyhow::Error) -> Option<u16> {
    error
        .downcast_ref::<reqwest::Error>()
        .and_then(|error| error.status())
        .map(|status| status.as_u16())
}

fn is_req_transport_error(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<reqwest::Error>()
        .is_some_and(|e| e.is_timeout() || e.is_connect())
}

pub async fn retry_with_config<F, Fut, T>(config: &RetryConfig, operation: F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<T>>,
{
    let mut strategy = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(config.min_delay_ms))
        .with_factor(config.backoff_factor as f32)
        .with_max_times(config.max_retry_attempts)
        .with_jitter();

    if let Some(max_delay) = config.max_delay {
        strategy = strategy.with_max_delay(Duration::from_secs(max_delay));
    }

    operation
        .retry(strategy)
        .when(should_retry)
        .notify(|error: &anyhow::Error, delay: Duration| {
            tracing::warn!(error = %error, delay_ms = delay.as_millis() as u64, "Retrying generation request");
        })
        .await
        .map_err(into_cause)
}

/// Strips the retry marker once retries are exhausted so callers see the
/// underlying failure.
fn into_cause(error: anyhow::Error) -> anyhow::Error {
    match error.downcast::<Error>() {
        Ok(Error::Retryable(cause)) => cause,
        Ok(other) => other.into(),
        Err(error) => error,
    }
}

/// Only `Error::Retryable` triggers another attempt.
fn should_retry(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<Error>()
        .is_some_and(|error| matches!(error, Error::Retryable(_)))
}
