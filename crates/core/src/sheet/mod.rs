//! Spreadsheet model.
//!
//! - [`cell`] - Cell coordinates and base-26 column names
//! - [`range`] - Ordered cell ranges
//! - [`adapter`] - Reader, writer and notifier traits implemented by hosts
//! - [`memory`] - In-memory workbook
//! - [`frame`] - Key column plus data columns for one load job

pub mod adapter;
pub mod cell;
pub mod frame;
pub mod memory;
pub mod range;

pub use adapter::{CellValue, Notifier, SheetReader, SheetWriter, Spreadsheet, UserChoice};
pub use cell::{column_index, column_name, Cell};
pub use frame::{DataColumn, DataFrame};
pub use memory::MemorySheet;
pub use range::CellRange;
