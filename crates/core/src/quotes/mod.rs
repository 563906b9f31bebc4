//! Quote loading.
//!
//! - [`job`] - Where labels are read and prices written
//! - [`loader`] - Runs a job: classify, fetch, extract, write back
//! - [`constants`] - Preset ranges and notification texts
//!
//! # Architecture
//!
//! ```text
//! PriceLoader → FetchAgent → market-data crate (classifier, extractor)
//!       ↓
//! Spreadsheet (SheetReader + SheetWriter)
//! ```

pub mod constants;
pub mod job;
pub mod loader;

pub use job::LoadJob;
pub use loader::{run_and_notify, LoadReport, LoaderConfig, PriceLoader};
