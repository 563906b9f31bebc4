//! Spreadsheet and notification collaborators.
//!
//! The loader never talks to a spreadsheet application directly; hosts
//! implement these traits. [`MemorySheet`](super::MemorySheet) is the
//! in-process implementation.

use std::fmt;

use loadprices_market_data::models::{parse_decimal, ColumnFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

use super::range::CellRange;

/// Content of one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(Decimal),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Convert a field of a price record for a column of the given format.
    ///
    /// Blank text is an empty cell. A numeric column takes a decimal when the
    /// text parses as one and falls back to the text otherwise.
    pub fn from_field(text: &str, format: ColumnFormat) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        match format {
            ColumnFormat::Numeric => parse_decimal(text)
                .map(Self::Number)
                .unwrap_or_else(|| Self::Text(text.to_string())),
            ColumnFormat::Text => Self::Text(text.to_string()),
        }
    }

    /// Text as a spreadsheet would show it; empty for an empty cell.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Reads cell text from a named sheet.
pub trait SheetReader {
    /// Text of every cell in the first column of `range`, top to bottom.
    fn read_cells(&self, sheet: &str, range: &CellRange) -> Result<Vec<String>>;
}

/// Clears and writes cells of a named sheet.
pub trait SheetWriter {
    /// Remove values and strings from every cell of `range`.
    fn clear_cells(&mut self, sheet: &str, range: &CellRange) -> Result<()>;

    /// Store `value` at the 0-based position; `format` says whether the
    /// destination column holds numbers or text.
    fn write_cell(
        &mut self,
        sheet: &str,
        col: u32,
        row: u32,
        value: &CellValue,
        format: ColumnFormat,
    ) -> Result<()>;
}

/// A sheet that can be both read and written.
pub trait Spreadsheet: SheetReader + SheetWriter {}

impl<T: SheetReader + SheetWriter> Spreadsheet for T {}

/// Button pressed to dismiss a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserChoice {
    Ok,
    Cancel,
    Yes,
    No,
}

/// Shows end-of-run messages to the user.
pub trait Notifier {
    fn notify(&self, message: &str, title: &str) -> UserChoice;
}
