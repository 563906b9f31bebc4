//! Yahoo Finance quote endpoint.
//!
//! The endpoint takes a comma-joined list of tickers and answers with a
//! `quoteResponse` document:
//!
//! ```text
//! GET https://query1.finance.yahoo.com/v7/finance/quote?symbols=BP.L,EURUSD=X,^FTSE
//!
//! {"quoteResponse":{"result":[{"symbol":"BP.L","regularMarketPrice":512.3,"currency":"GBp",...}],"error":null}}
//! ```
//!
//! - [`build_url`] assembles the request URL
//! - [`QuoteTable`] extracts price and currency per ticker from the body

mod extract;
mod models;

use std::collections::HashSet;

use log::debug;

pub use extract::{CurrencyNormalization, ExtractOptions, QuoteTable};
pub use models::{YahooQuoteEnvelope, YahooQuoteRecord, YahooQuoteResponse};

/// Base URL of the quote endpoint, ready for query parameters.
pub const YAHOO_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote?";

/// Name of the query parameter carrying the tickers.
pub const SYMBOLS_PARAM: &str = "symbols";

/// Build the quote URL for `tickers`.
///
/// Tickers are deduplicated (first occurrence kept) and joined with commas.
/// They are not percent-encoded: the ticker grammars only produce uppercase
/// letters, digits, `.`, `^` and `=`. A `?` or `&` is inserted when `base`
/// does not already end with one.
pub fn build_url<I, S>(base: &str, tickers: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut joined = String::new();
    for ticker in tickers {
        let ticker = ticker.as_ref();
        if !seen.insert(ticker.to_string()) {
            continue;
        }
        if !joined.is_empty() {
            joined.push(',');
        }
        joined.push_str(ticker);
    }

    let separator = if base.ends_with('?') || base.ends_with('&') {
        ""
    } else if base.contains('?') {
        "&"
    } else {
        "?"
    };

    let url = format!("{}{}{}={}", base, separator, SYMBOLS_PARAM, joined);
    debug!("url: {}", url);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_tickers() {
        assert_eq!(
            build_url(YAHOO_QUOTE_URL, ["BP.L", "EURUSD=X", "^FTSE"]),
            "https://query1.finance.yahoo.com/v7/finance/quote?symbols=BP.L,EURUSD=X,^FTSE"
        );
    }

    #[test]
    fn test_build_url_deduplicates() {
        assert_eq!(
            build_url(YAHOO_QUOTE_URL, ["BP", "VOD.L", "BP"]),
            format!("{}symbols=BP,VOD.L", YAHOO_QUOTE_URL)
        );
    }

    #[test]
    fn test_build_url_separator() {
        assert_eq!(
            build_url("http://localhost/quote", ["BP"]),
            "http://localhost/quote?symbols=BP"
        );
        assert_eq!(
            build_url("http://localhost/quote?lang=en", ["BP"]),
            "http://localhost/quote?lang=en&symbols=BP"
        );
        assert_eq!(
            build_url("http://localhost/quote?lang=en&", ["BP"]),
            "http://localhost/quote?lang=en&symbols=BP"
        );
    }

    #[test]
    fn test_build_url_without_tickers() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            build_url(YAHOO_QUOTE_URL, none),
            format!("{}symbols=", YAHOO_QUOTE_URL)
        );
    }
}
