use std::sync::Arc;

/// Canonical instrument identifier accepted by the quote endpoint
/// (e.g. "BP.L", "^FTSE", "EURUSD=X")
pub type Ticker = Arc<str>;

/// Raw text read from one key cell of the spreadsheet
pub type Label = String;
