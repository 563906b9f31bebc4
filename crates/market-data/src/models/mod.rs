//! Market data models
//!
//! This module contains the core data types for quote loading:
//! - `types` - Type aliases for common identifiers (Ticker, Label)
//! - `instrument` - Asset classes that select a ticker grammar
//! - `quote` - Price records, their column layout and defaults

mod instrument;
mod quote;
mod types;

pub use instrument::AssetClass;
pub use quote::{
    parse_decimal, ColumnFormat, PriceRecord, DEFAULT_CURRENCY, DEFAULT_PRICE,
    PRICE_FIELD_FORMATS, PRICE_FIELD_NAMES,
};
pub use types::{Label, Ticker};
