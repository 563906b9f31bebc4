//! Yahoo Finance quote response models.
//!
//! Only the three fields the loader writes are modelled. They are kept as
//! raw JSON values because the endpoint is not consistent about types
//! (prices arrive as numbers, occasionally as strings or `null`).

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level wrapper: `{"quoteResponse": {...}}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteEnvelope {
    pub quote_response: YahooQuoteResponse,
}

/// `{"result": [...], "error": ...}`
#[derive(Debug, Deserialize)]
pub struct YahooQuoteResponse {
    #[serde(default)]
    pub result: Vec<YahooQuoteRecord>,
    // Note: error is reported by the endpoint but an error body still carries an empty result
    #[serde(default)]
    pub error: Option<Value>,
}

/// One instrument of the result array. Other fields are ignored.
///
/// Read through a plain JSON object, so a key repeated inside one record
/// keeps its last value.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct YahooQuoteRecord {
    pub symbol: Option<Value>,
    pub regular_market_price: Option<Value>,
    pub currency: Option<Value>,
}

impl From<Map<String, Value>> for YahooQuoteRecord {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            symbol: fields.remove("symbol"),
            regular_market_price: fields.remove("regularMarketPrice"),
            currency: fields.remove("currency"),
        }
    }
}

impl YahooQuoteRecord {
    pub fn symbol(&self) -> String {
        value_text(self.symbol.as_ref())
    }

    pub fn price(&self) -> String {
        value_text(self.regular_market_price.as_ref())
    }

    pub fn currency(&self) -> String {
        value_text(self.currency.as_ref())
    }
}

/// Render a scalar field as cell text; absent, `null` and structured values
/// become the empty string.
fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => String::new(),
    }
}
