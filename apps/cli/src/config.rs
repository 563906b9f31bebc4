use std::time::Duration;

use loadprices_core::LoaderConfig;
use loadprices_market_data::agent::{FetchConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT};
use loadprices_market_data::provider::yahoo::{
    CurrencyNormalization, ExtractOptions, YAHOO_QUOTE_URL,
};

pub struct Config {
    pub web_timeout: Duration,
    pub max_tries: u32,
    pub quote_url: String,
    pub normalize_pence: bool,
}

impl Config {
    /// Read `.env` then the `LOADPRICES_*` variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let web_timeout = var("LOADPRICES_WEB_TIMEOUT")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        let max_tries = var("LOADPRICES_MAX_TRIES")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let quote_url = var("LOADPRICES_QUOTE_URL").unwrap_or_else(|| YAHOO_QUOTE_URL.into());
        let normalize_pence = var("LOADPRICES_NORMALIZE_PENCE")
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            web_timeout,
            max_tries,
            quote_url,
            normalize_pence,
        }
    }

    pub fn loader_config(&self) -> LoaderConfig {
        let currency = if self.normalize_pence {
            CurrencyNormalization::PenceAsGbx
        } else {
            CurrencyNormalization::Verbatim
        };
        LoaderConfig {
            fetch: FetchConfig::new(self.web_timeout, self.max_tries),
            extract: ExtractOptions { currency },
            quote_url: self.quote_url.clone(),
        }
    }
}
