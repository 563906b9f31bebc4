//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for market data operations
//! - [`TransportError`]: Failures of a single HTTP attempt
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use std::time::Duration;

use thiserror::Error;

/// Failure of one HTTP attempt.
///
/// Produced by an [`HttpTransport`](crate::agent::HttpTransport) and recorded
/// by the fetch agent as the last error of the attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The attempt did not complete within its timeout.
    #[error("Timeout: no response within {0:?}")]
    Timeout(Duration),

    /// The server answered with a non-success status.
    #[error("HTTPError: {0}")]
    Status(u16),

    /// The connection could not be established.
    #[error("URLError: {0}")]
    Connect(String),

    /// The request could not be built (bad header, unsupported scheme).
    #[error("RequestError: {0}")]
    Request(String),

    /// Any other failure while sending the request or reading the body.
    #[error("Exception: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns the retry classification for this failure.
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Request(_) => RetryClass::Never,
            Self::Timeout(_) | Self::Status(_) | Self::Connect(_) | Self::Other(_) => {
                RetryClass::WithBackoff
            }
        }
    }
}

/// Errors that can occur during market data operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// The URL handed to the fetch agent is not an absolute URL.
    /// Detected locally, no network attempt is made.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        message: String,
    },

    /// A single HTTP attempt failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Every attempt failed and the retry budget is spent.
    #[error("No response after {attempts} attempt(s)")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
    },

    /// The agent has not fetched anything yet.
    #[error("Nothing fetched yet")]
    NotFetched,

    /// An asset class name could not be parsed.
    #[error("Unknown asset class: {0}")]
    UnknownAssetClass(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// Only transport failures are worth another attempt; everything else is
    /// either local or already the result of giving up.
    ///
    /// # Examples
    ///
    /// ```
    /// use loadprices_market_data::errors::{MarketDataError, RetryClass, TransportError};
    ///
    /// let error = MarketDataError::Transport(TransportError::Status(503));
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::Exhausted { attempts: 5 };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Transport(e) => e.retry_class(),
            Self::InvalidUrl { .. }
            | Self::Exhausted { .. }
            | Self::NotFetched
            | Self::UnknownAssetClass(_)
            | Self::Client(_) => RetryClass::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_retries_with_backoff() {
        let error = MarketDataError::Transport(TransportError::Timeout(Duration::from_secs(10)));
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_status_retries_with_backoff() {
        let error = MarketDataError::from(TransportError::Status(404));
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_connect_retries_with_backoff() {
        let error = MarketDataError::from(TransportError::Connect("refused".to_string()));
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_request_build_never_retries() {
        let error = MarketDataError::from(TransportError::Request("bad header".to_string()));
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_invalid_url_never_retries() {
        let error = MarketDataError::InvalidUrl {
            url: "this is garbage".to_string(),
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::from(TransportError::Status(404));
        assert_eq!(format!("{}", error), "HTTPError: 404");

        let error = MarketDataError::Exhausted { attempts: 5 };
        assert_eq!(format!("{}", error), "No response after 5 attempt(s)");

        let error = MarketDataError::UnknownAssetClass("bond".to_string());
        assert_eq!(format!("{}", error), "Unknown asset class: bond");
    }
}
