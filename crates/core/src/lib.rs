//! Loadprices Core - Spreadsheet coordinates and the quote loading job.
//!
//! This crate turns a column of free-text labels into prices written next
//! to them. Spreadsheet access goes through the traits in [`sheet`], so
//! any host (an office suite, a file, memory) can drive a [`PriceLoader`].

pub mod errors;
pub mod quotes;
pub mod sheet;

pub use quotes::{run_and_notify, LoadJob, LoadReport, LoaderConfig, PriceLoader};
pub use sheet::{Cell, CellRange, CellValue, MemorySheet, Notifier, Spreadsheet, UserChoice};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
