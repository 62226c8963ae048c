use backon::ExponentialBuilder;
use std::time::Duration;

/// Number of HTTP attempts a single typed query may make
pub const DEFAULT_RETRY_BUDGET: u32 = 5;

/// Creates the default exponential backoff builder used between retried attempts
///
/// Configured with:
/// - Initial interval: 500ms
/// - Max interval: 4s
/// - Max times: one less than [`DEFAULT_RETRY_BUDGET`]
/// - Factor: 2.0
/// - Jitter enabled
#[must_use]
pub fn default_backoff_builder() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(4))
        .with_max_times((DEFAULT_RETRY_BUDGET - 1) as usize)
        .with_factor(2.0)
        .with_jitter()
}

/// Determines if an HTTP status code should trigger a retry
///
/// Only 500 is treated as transient.
#[must_use]
pub const fn is_retryable_status(code: u16) -> bool {
    code == 500
}
