//! Loadprices Market Data Crate
//!
//! Resolves spreadsheet labels to tickers, fetches quotes for them and
//! extracts a price record per ticker.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Labels       |  ("BP.L", "EUR:USD", "FTSE", "garbage!!")
//! +------------------+
//!          |
//!          v
//! +------------------+
//! | LabelClassifier  |  (ordered rule table per AssetClass)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  Classification  |  (label -> ticker, unmatched labels dropped)
//! +------------------+
//!          |  build_url
//!          v
//! +------------------+
//! |   FetchAgent     |  (bounded retries, doubling timeout)
//! +------------------+
//!          |  body or "no response"
//!          v
//! +------------------+
//! |   QuoteTable     |  (ticker -> PriceRecord)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`AssetClass`] - Selects the ticker grammar
//! - [`LabelClassifier`] / [`Classification`] - Label resolution
//! - [`FetchAgent`] / [`FetchConfig`] - Network access
//! - [`QuoteTable`] / [`PriceRecord`] - Extracted quotes

pub mod agent;
pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;

pub use agent::{FetchAgent, FetchConfig, FetchPhase, HttpTransport, ReqwestTransport, NO_RESPONSE};
pub use errors::{MarketDataError, RetryClass, TransportError};
pub use models::{AssetClass, ColumnFormat, Label, PriceRecord, Ticker};
pub use provider::yahoo::{
    build_url, CurrencyNormalization, ExtractOptions, QuoteTable, YAHOO_QUOTE_URL,
};
pub use resolver::{classify, Classification, LabelClassifier};
