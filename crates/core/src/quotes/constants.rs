//! Quote loading constants.

/// Sheet used by the preset jobs.
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Preset key ranges and data columns, one per asset class.
pub const STOCKS_KEY_RANGE: &str = "A1:A200";
pub const STOCKS_DATA_COLUMNS: [&str; 2] = ["B", "C"];

pub const FX_KEY_RANGE: &str = "E1:G200";
pub const FX_DATA_COLUMNS: [&str; 1] = ["F"];

pub const INDICES_KEY_RANGE: &str = "H1:H200";
pub const INDICES_DATA_COLUMNS: [&str; 2] = ["I", "J"];

/// Notification shown after a successful run.
pub const FINISHED_MESSAGE: &str = "Processing finished";
pub const FINISHED_TITLE: &str = "Status";

/// Title of the notification shown when the quote fetch failed.
pub const WEB_ERROR_TITLE: &str = "Web error";

/// Title of the notification shown for any other failure.
pub const ERROR_TITLE: &str = "Error";
