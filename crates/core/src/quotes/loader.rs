//! Price loader.
//!
//! Runs one [`LoadJob`] against a spreadsheet:
//!
//! ```text
//! read key column -> classify -> clear data columns -> build url
//!     -> fetch -> extract -> re-key by label -> write masked rows
//! ```
//!
//! Destination cells are cleared before the fetch, so a failed fetch leaves
//! them blank instead of holding stale prices.

use log::{debug, info, warn};
use loadprices_market_data::agent::{FetchAgent, FetchConfig, HttpTransport, ReqwestTransport};
use loadprices_market_data::provider::yahoo::{ExtractOptions, QuoteTable, YAHOO_QUOTE_URL};

use crate::errors::{Error, Result};
use crate::sheet::{DataColumn, DataFrame, Notifier, Spreadsheet, UserChoice};

use super::constants::{ERROR_TITLE, FINISHED_MESSAGE, FINISHED_TITLE, WEB_ERROR_TITLE};
use super::job::LoadJob;

/// Settings shared by every job a loader runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractOptions,
    /// Quote endpoint, ready for the `symbols` parameter
    pub quote_url: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractOptions::default(),
            quote_url: YAHOO_QUOTE_URL.to_string(),
        }
    }
}

/// Summary of one successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Labels read, after trailing blanks were dropped
    pub labels: usize,
    /// Labels that resolved to a ticker
    pub matched: usize,
    /// Distinct tickers requested
    pub tickers: usize,
    /// Quote URL, `None` when there was nothing to fetch
    pub url: Option<String>,
    /// Records in the response
    pub quotes: usize,
    pub cells_written: usize,
}

/// Loads prices into a spreadsheet.
pub struct PriceLoader<T = ReqwestTransport> {
    agent: FetchAgent<T>,
    config: LoaderConfig,
}

impl PriceLoader<ReqwestTransport> {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        let agent = FetchAgent::new(config.fetch)?;
        Ok(Self { agent, config })
    }
}

impl<T: HttpTransport> PriceLoader<T> {
    pub fn with_transport(transport: T, config: LoaderConfig) -> Self {
        Self {
            agent: FetchAgent::with_transport(transport, config.fetch),
            config,
        }
    }

    /// Agent of the last run, for diagnostics.
    pub fn agent(&self) -> &FetchAgent<T> {
        &self.agent
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run `job` against `sheet`.
    ///
    /// A failed fetch returns [`Error::FetchFailed`] after the destination
    /// cells were cleared. A key column without any ticker skips the fetch.
    pub fn run<S: Spreadsheet + ?Sized>(&mut self, sheet: &mut S, job: &LoadJob) -> Result<LoadReport> {
        info!("Loading {}", job);
        debug!("keyrange: {}", job.key_range);
        debug!("datacols: {:?}", job.data_columns);

        let key = DataColumn::read(&*sheet, &job.sheet, &job.key_range, true)?;
        debug!("keydata: {}", key);

        let classification = job.classifier().classify(key.values());
        let tickers = classification.tickers();

        let mut report = LoadReport {
            labels: key.len(),
            matched: classification.len(),
            tickers: tickers.len(),
            ..LoadReport::default()
        };

        let mut frame = DataFrame::new(
            key,
            &classification,
            &job.data_columns,
            QuoteTable::formats(),
        )?;
        debug!("dataframe: {}", frame);

        for range in job.data_ranges()? {
            sheet.clear_cells(&job.sheet, &range)?;
        }

        if tickers.is_empty() {
            info!("No tickers in {}, nothing to fetch", job.key_range);
            return Ok(report);
        }

        let url = classification.url(&self.config.quote_url);
        report.url = Some(url.clone());

        let text = self.agent.fetch(&url);
        if !self.agent.ok() {
            let reason = match self.agent.error() {
                Some(e) => format!("fetch URL {} FAILED: {}", url, e),
                None => format!("fetch URL {} FAILED", url),
            };
            warn!("{}", reason);
            debug!("agent:\n{}", self.agent);
            return Err(Error::FetchFailed { url, reason });
        }

        let table = QuoteTable::parse_with(&text, &self.config.extract);
        report.quotes = table.len();

        frame.update(&table, &classification);
        debug!("dataframe: {}", frame);

        report.cells_written = frame.write(sheet, &job.sheet)?;
        info!(
            "Loaded {} quote(s) for {} ticker(s), {} cell(s) written",
            report.quotes, report.tickers, report.cells_written
        );
        Ok(report)
    }
}

/// Run `job` and report the outcome through `notifier`.
///
/// The result is returned unchanged; the notification is a side effect.
pub fn run_and_notify<T, S, N>(
    loader: &mut PriceLoader<T>,
    sheet: &mut S,
    job: &LoadJob,
    notifier: &N,
) -> (Result<LoadReport>, UserChoice)
where
    T: HttpTransport,
    S: Spreadsheet + ?Sized,
    N: Notifier + ?Sized,
{
    let result = loader.run(sheet, job);
    let choice = match &result {
        Ok(_) => notifier.notify(FINISHED_MESSAGE, FINISHED_TITLE),
        Err(e @ Error::FetchFailed { .. }) => notifier.notify(&e.to_string(), WEB_ERROR_TITLE),
        Err(e) => notifier.notify(&e.to_string(), ERROR_TITLE),
    };
    (result, choice)
}
