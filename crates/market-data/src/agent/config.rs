use std::time::Duration;

/// Timeout of the first attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Attempts made before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Retry configuration of a [`FetchAgent`](super::FetchAgent).
///
/// The timeout doubles after every failed attempt, so the worst case for the
/// defaults is 10 + 20 + 40 + 80 + 160 seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    /// Timeout of the first attempt.
    pub initial_timeout: Duration,
    /// Total number of attempts, including the first.
    pub max_attempts: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            initial_timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl FetchConfig {
    /// Create a configuration; a zero timeout or zero attempts fall back to
    /// the defaults.
    pub fn new(initial_timeout: Duration, max_attempts: u32) -> Self {
        Self {
            initial_timeout,
            max_attempts,
        }
        .sanitized()
    }

    /// Same as [`FetchConfig::new`] with the timeout in whole seconds.
    pub fn from_secs(initial_timeout_secs: u64, max_attempts: u32) -> Self {
        Self::new(Duration::from_secs(initial_timeout_secs), max_attempts)
    }

    /// Replace zero values with the defaults.
    pub fn sanitized(self) -> Self {
        Self {
            initial_timeout: if self.initial_timeout.is_zero() {
                DEFAULT_TIMEOUT
            } else {
                self.initial_timeout
            },
            max_attempts: if self.max_attempts == 0 {
                DEFAULT_MAX_ATTEMPTS
            } else {
                self.max_attempts
            },
        }
    }

    /// Upper bound of the time one fetch can block: the sum of every
    /// attempt's timeout.
    pub fn worst_case_latency(&self) -> Duration {
        let mut total = Duration::ZERO;
        let mut timeout = self.initial_timeout;
        for _ in 0..self.max_attempts {
            total = total.saturating_add(timeout);
            timeout = timeout.saturating_mul(2);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.initial_timeout, Duration::from_secs(10));
        assert_eq!(config.max_attempts, 5);
    }

    #[test]
    fn test_zero_values_fall_back_to_defaults() {
        assert_eq!(FetchConfig::from_secs(0, 0), FetchConfig::default());
        assert_eq!(FetchConfig::from_secs(3, 0).max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(FetchConfig::from_secs(0, 2).initial_timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_worst_case_latency() {
        assert_eq!(
            FetchConfig::default().worst_case_latency(),
            Duration::from_secs(310)
        );
        assert_eq!(
            FetchConfig::from_secs(1, 1).worst_case_latency(),
            Duration::from_secs(1)
        );
    }
}
