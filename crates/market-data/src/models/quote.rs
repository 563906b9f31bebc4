use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response field names captured for each instrument, in column order.
pub const PRICE_FIELD_NAMES: [&str; 2] = ["regularMarketPrice", "currency"];

/// Cell format for each captured field, in column order.
pub const PRICE_FIELD_FORMATS: [ColumnFormat; 2] = [ColumnFormat::Numeric, ColumnFormat::Text];

/// Price written for an instrument the endpoint did not return.
pub const DEFAULT_PRICE: &str = "0";

/// Currency written for an instrument the endpoint did not return.
pub const DEFAULT_CURRENCY: &str = "n/a";

/// How a value is stored in its destination cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnFormat {
    Numeric,
    Text,
}

/// Price and currency of one instrument, as returned by the endpoint.
///
/// The price is kept as the text the response carried ("1351.0") so that
/// nothing is lost before the value reaches a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Regular market price
    pub price: String,

    /// Quote currency (may be a minor unit such as "GBp")
    pub currency: String,
}

impl PriceRecord {
    pub fn new(price: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            currency: currency.into(),
        }
    }

    /// Field values in column order (see [`PRICE_FIELD_NAMES`]).
    pub fn fields(&self) -> [&str; 2] {
        [self.price.as_str(), self.currency.as_str()]
    }

    /// Price as a decimal, accepting plain and scientific notation.
    ///
    /// Returns `None` for an empty or non-numeric price.
    pub fn price_decimal(&self) -> Option<Decimal> {
        parse_decimal(&self.price)
    }
}

impl Default for PriceRecord {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE, DEFAULT_CURRENCY)
    }
}

/// Parse a numeric cell value ("1351.0", "1.5E-4").
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
