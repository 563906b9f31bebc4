//! Core error types for the loadprices application.
//!
//! Parse failures of cell and range names are reported immediately and are
//! never retried. Network failures surface here only as [`Error::FetchFailed`]
//! once the fetch agent has given up.

use loadprices_market_data::errors::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the loadprices application.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed cell or range text.
    #[error("Invalid cell name: {0}")]
    Format(String),

    /// A numeric coordinate is negative or too large.
    #[error("Cell position out of range: {0}")]
    OutOfRange(String),

    /// Range start lies after range end.
    #[error("Invalid range orientation: {0}")]
    Orientation(String),

    /// The spreadsheet collaborator failed.
    #[error("Sheet operation failed: {0}")]
    Sheet(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    /// Every fetch attempt failed.
    #[error("{reason}")]
    FetchFailed {
        /// URL that was requested
        url: String,
        /// Last error recorded by the fetch agent
        reason: String,
    },
}
