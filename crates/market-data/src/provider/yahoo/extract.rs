//! Lenient extraction of price records from a quote response body.
//!
//! The body is first read as a complete `quoteResponse` document. When that
//! fails (truncated transfer, HTML error page, leading garbage) the records
//! are read one at a time from the first `[` in the text. An element that
//! is not a readable record is stepped over; scanning ends at the close of
//! the list or where the text runs out.
//!
//! Policies, all of which hold for either path:
//! - a field missing from a record (or `null`) becomes the empty string
//! - a record without a symbol is skipped
//! - a symbol seen twice keeps the last record
//! - nothing here returns an error; the worst case is an empty table

use std::collections::BTreeMap;

use log::debug;
use serde_json::Deserializer;

use crate::models::{
    ColumnFormat, PriceRecord, PRICE_FIELD_FORMATS, PRICE_FIELD_NAMES,
};
use crate::resolver::Classification;

use super::models::{YahooQuoteEnvelope, YahooQuoteRecord};

/// Currency code post-processing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CurrencyNormalization {
    /// Keep the currency exactly as returned.
    #[default]
    Verbatim,
    /// Rewrite the pence marker `GBp` as `GBX`.
    PenceAsGbx,
}

impl CurrencyNormalization {
    pub fn apply(&self, currency: String) -> String {
        match self {
            Self::Verbatim => currency,
            Self::PenceAsGbx if currency == "GBp" => "GBX".to_string(),
            Self::PenceAsGbx => currency,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub currency: CurrencyNormalization,
}

/// Ticker to price record table built from one response body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteTable {
    quotes: BTreeMap<String, PriceRecord>,
}

impl QuoteTable {
    /// Extract with default options.
    pub fn parse(text: &str) -> Self {
        Self::parse_with(text, &ExtractOptions::default())
    }

    pub fn parse_with(text: &str, options: &ExtractOptions) -> Self {
        let mut quotes = BTreeMap::new();
        for record in read_records(text) {
            let symbol = record.symbol();
            if symbol.is_empty() {
                continue;
            }
            let currency = options.currency.apply(record.currency());
            quotes.insert(symbol, PriceRecord::new(record.price(), currency));
        }
        let table = Self { quotes };
        debug!("quotes: {:?}", table.quotes);
        table
    }

    /// Response field names, in column order.
    pub fn names() -> &'static [&'static str] {
        &PRICE_FIELD_NAMES
    }

    /// Cell formats, in column order.
    pub fn formats() -> &'static [ColumnFormat] {
        &PRICE_FIELD_FORMATS
    }

    /// Record used for a requested ticker the response did not contain.
    pub fn defaults() -> PriceRecord {
        PriceRecord::default()
    }

    pub fn data(&self) -> &BTreeMap<String, PriceRecord> {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Record returned for `ticker`, if any.
    pub fn get(&self, ticker: &str) -> Option<&PriceRecord> {
        self.quotes.get(ticker)
    }

    /// Direct lookup by ticker.
    ///
    /// - blank key: `None` (nothing should be written)
    /// - key present: its record
    /// - key absent: [`QuoteTable::defaults`]
    pub fn lookup(&self, key: &str) -> Option<PriceRecord> {
        if key.trim().is_empty() {
            return None;
        }
        Some(self.get(key).cloned().unwrap_or_else(Self::defaults))
    }

    /// Lookup by label through `classification`.
    ///
    /// A label without a ticker falls back to a direct lookup, so a blank
    /// label still yields `None` and any other unknown label the defaults.
    pub fn lookup_label(&self, classification: &Classification, label: &str) -> Option<PriceRecord> {
        match classification.get(label) {
            Some(ticker) => self.lookup(ticker),
            None => self.lookup(label),
        }
    }
}

fn read_records(text: &str) -> Vec<YahooQuoteRecord> {
    match serde_json::from_str::<YahooQuoteEnvelope>(text) {
        Ok(envelope) => envelope.quote_response.result,
        Err(e) => {
            debug!("quote response is not a complete document ({}), scanning records", e);
            scan_records(text)
        }
    }
}

/// Read records one by one from the first list in `text`.
fn scan_records(text: &str) -> Vec<YahooQuoteRecord> {
    let mut records = Vec::new();
    let Some(open) = text.find('[') else {
        return records;
    };

    let mut rest = &text[open + 1..];
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if rest.is_empty() || rest.starts_with(']') {
            break;
        }
        if rest.starts_with('{') {
            let mut stream = Deserializer::from_str(rest).into_iter::<YahooQuoteRecord>();
            match stream.next() {
                Some(Ok(record)) => {
                    let consumed = stream.byte_offset();
                    records.push(record);
                    rest = &rest[consumed..];
                    continue;
                }
                Some(Err(e)) => debug!("skipping unreadable quote record: {}", e),
                None => break,
            }
        }
        match element_len(rest) {
            Some(len) if len > 0 => rest = &rest[len..],
            _ => break,
        }
    }
    records
}

/// Byte length of the list element at the start of `text`.
///
/// Brackets are balanced and string contents ignored. `None` when the text
/// ends inside the element.
fn element_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' => depth += 1,
            '}' | ']' if depth == 0 => return Some(i),
            '}' | ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetClass;
    use crate::resolver::classify;

    const ONE_SHARE: &str = r#"{"quoteResponse":{"result":[{"symbol":"GSK.L","regularMarketPrice":1351.0,"currency":"GBp"}],"error":null}}"#;

    const TWO_SHARES: &str = r#"{"quoteResponse":{"result":[{"language":"en-US","quoteType":"EQUITY","currency":"GBp","regularMarketPrice":178.95,"exchange":"LSE","symbol":"BARC.L"},{"language":"en-US","quoteType":"EQUITY","currency":"GBp","regularMarketPrice":220.95,"exchange":"LSE","symbol":"VOD.L"}],"error":null}}"#;

    const EMPTY_RESULT: &str = r#"{"quoteResponse":{"result":[],"error":null}}"#;

    const SAME_SHARE_REPEATED: &str = r#"{"quoteResponse":{"result":[{"symbol":"AAL.L","regularMarketPrice":1480.5,"currency":"GBp"},{"symbol":"AAL.L","regularMarketPrice":1484.0,"currency":"GBp"}],"error":null}}"#;

    const MIXED: &str = r#"{"quoteResponse":{"result":[{"symbol":"AAL.L","regularMarketPrice":1484.0,"currency":"GBp"},{"symbol":"GBPUSD=X","regularMarketPrice":1.315824,"currency":"USD"}],"error":null}}"#;

    fn record(price: &str, currency: &str) -> PriceRecord {
        PriceRecord::new(price, currency)
    }

    #[test]
    fn test_empty_text() {
        assert!(QuoteTable::parse("").is_empty());
    }

    #[test]
    fn test_sentinel_body() {
        assert!(QuoteTable::parse("no response").is_empty());
    }

    #[test]
    fn test_empty_result() {
        assert!(QuoteTable::parse(EMPTY_RESULT).is_empty());
    }

    #[test]
    fn test_one_share() {
        let table = QuoteTable::parse(ONE_SHARE);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("GSK.L"), Some(&record("1351.0", "GBp")));
    }

    #[test]
    fn test_two_shares_ignore_other_fields() {
        let table = QuoteTable::parse(TWO_SHARES);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("BARC.L"), Some(&record("178.95", "GBp")));
        assert_eq!(table.get("VOD.L"), Some(&record("220.95", "GBp")));
    }

    #[test]
    fn test_symbol_only_record() {
        let text = r#"{"quoteResponse":{"result":[{"symbol":"AAT.L"}],"error":null}}"#;
        let table = QuoteTable::parse(text);
        assert_eq!(table.get("AAT.L"), Some(&record("", "")));
    }

    #[test]
    fn test_record_without_symbol_is_skipped() {
        let text = r#"{"quoteResponse":{"result":[{"regularMarketPrice":1.0,"currency":"USD"}],"error":null}}"#;
        assert!(QuoteTable::parse(text).is_empty());
    }

    #[test]
    fn test_repeated_symbol_last_wins() {
        let table = QuoteTable::parse(SAME_SHARE_REPEATED);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("AAL.L"), Some(&record("1484.0", "GBp")));
    }

    #[test]
    fn test_mixed_query() {
        let table = QuoteTable::parse(MIXED);
        assert_eq!(table.get("AAL.L"), Some(&record("1484.0", "GBp")));
        assert_eq!(table.get("GBPUSD=X"), Some(&record("1.315824", "USD")));
    }

    #[test]
    fn test_truncated_body_keeps_complete_records() {
        let text = &MIXED[..MIXED.find("\"currency\":\"USD\"").unwrap()];
        let table = QuoteTable::parse(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("AAL.L"), Some(&record("1484.0", "GBp")));
    }

    #[test]
    fn test_repeated_key_in_record_does_not_lose_others() {
        let text = r#"{"quoteResponse":{"result":[{"symbol":"AAA.L","symbol":"AAA.L","regularMarketPrice":1.0,"currency":"GBp"},{"symbol":"BBB.L","regularMarketPrice":2.0,"currency":"GBp"}],"error":null}}"#;
        let table = QuoteTable::parse(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("AAA.L"), Some(&record("1.0", "GBp")));
        assert_eq!(table.get("BBB.L"), Some(&record("2.0", "GBp")));
    }

    #[test]
    fn test_unreadable_record_is_skipped() {
        let text = r#"{"quoteResponse":{"result":[{"symbol":"AAA.L","regularMarketPrice":NaN,"currency":"GBp","note":"a}b{\"c"},{"symbol":"BBB.L","regularMarketPrice":2.0,"currency":"GBp"}],"error":null}}"#;
        let table = QuoteTable::parse(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("AAA.L"), None);
        assert_eq!(table.get("BBB.L"), Some(&record("2.0", "GBp")));
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let text = r#"{"quoteResponse":{"result":[42,"x",[1,{"symbol":"NOPE"}],{"symbol":"BBB.L","regularMarketPrice":2.0,"currency":"GBp"}],"error":null}}"#;
        let table = QuoteTable::parse(text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("BBB.L"), Some(&record("2.0", "GBp")));
    }

    #[test]
    fn test_element_len() {
        assert_eq!(element_len(r#"{"a":"}"},{}"#), Some(9));
        assert_eq!(element_len("42, {}"), Some(2));
        assert_eq!(element_len("true]"), Some(4));
        assert_eq!(element_len(r#"{"a":[1,2"#), None);
    }

    #[test]
    fn test_leading_garbage_is_tolerated() {
        let text = format!("callback({});", ONE_SHARE);
        let table = QuoteTable::parse(&text);
        assert_eq!(table.get("GSK.L"), Some(&record("1351.0", "GBp")));
    }

    #[test]
    fn test_html_error_page() {
        let text = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert!(QuoteTable::parse(text).is_empty());
    }

    #[test]
    fn test_nested_values_inside_record() {
        let text = r#"{"quoteResponse":{"result":[{"symbol":"BP.L","tags":["a","b"],"meta":{"x":1},"regularMarketPrice":512.3,"currency":"GBp"}],"error":null}}"#;
        let table = QuoteTable::parse(text);
        assert_eq!(table.get("BP.L"), Some(&record("512.3", "GBp")));
    }

    #[test]
    fn test_pence_normalization_is_opt_in() {
        let table = QuoteTable::parse(ONE_SHARE);
        assert_eq!(table.get("GSK.L").map(|r| r.currency.as_str()), Some("GBp"));

        let options = ExtractOptions {
            currency: CurrencyNormalization::PenceAsGbx,
        };
        let table = QuoteTable::parse_with(ONE_SHARE, &options);
        assert_eq!(table.get("GSK.L").map(|r| r.currency.as_str()), Some("GBX"));

        let table = QuoteTable::parse_with(MIXED, &options);
        assert_eq!(table.get("GBPUSD=X").map(|r| r.currency.as_str()), Some("USD"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(QuoteTable::names(), &["regularMarketPrice", "currency"]);
        assert_eq!(
            QuoteTable::formats(),
            &[ColumnFormat::Numeric, ColumnFormat::Text]
        );
        assert_eq!(QuoteTable::defaults(), record("0", "n/a"));
    }

    #[test]
    fn test_lookup_blank_key_returns_none() {
        let table = QuoteTable::parse("");
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup(" \t "), None);
    }

    #[test]
    fn test_lookup_unknown_key_returns_defaults() {
        let table = QuoteTable::parse("");
        assert_eq!(table.lookup("NOT_A_KEY"), Some(QuoteTable::defaults()));
    }

    #[test]
    fn test_lookup_known_key() {
        let table = QuoteTable::parse(TWO_SHARES);
        assert_eq!(table.lookup("BARC.L"), Some(record("178.95", "GBp")));
    }

    #[test]
    fn test_lookup_label_through_classification() {
        let classification = classify(["GSK.L", "GSK."], AssetClass::Stock);
        let table = QuoteTable::parse(ONE_SHARE);

        assert_eq!(
            table.lookup_label(&classification, "GSK.L"),
            Some(record("1351.0", "GBp"))
        );
        // "GSK." resolves to "GSK", which the response did not contain
        assert_eq!(
            table.lookup_label(&classification, "GSK."),
            Some(QuoteTable::defaults())
        );
        assert_eq!(table.lookup_label(&classification, ""), None);
    }
}
