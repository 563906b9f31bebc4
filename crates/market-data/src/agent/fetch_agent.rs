use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::errors::{MarketDataError, RetryClass, TransportError};

use super::config::FetchConfig;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport, REQUEST_HEADERS};

/// Body returned by [`FetchAgent::fetch`] when no response could be read.
pub const NO_RESPONSE: &str = "no response";

/// Where the agent is in its retry loop.
///
/// ```text
/// Idle -> Trying -> Succeeded
///           |
///           +-> Retrying -> Trying ...
///           |
///           +-> Exhausted
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchPhase {
    /// Nothing fetched yet.
    Idle,
    /// An attempt is in flight.
    Trying,
    /// The last attempt failed and another one is allowed.
    Retrying,
    /// A 2xx response was read.
    Succeeded,
    /// No attempts left, or the request cannot succeed.
    Exhausted,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Trying => write!(f, "Trying"),
            Self::Retrying => write!(f, "Retrying"),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::Exhausted => write!(f, "Exhausted"),
        }
    }
}

/// Record of the most recent fetch. Reset at the start of every call.
#[derive(Clone, Debug)]
pub struct FetchState {
    pub phase: FetchPhase,
    pub url: String,
    /// Attempts made so far
    pub tries: u32,
    /// Timeout of the current (or last) attempt
    pub timeout: Duration,
    pub error: Option<MarketDataError>,
    pub response_code: Option<u16>,
    pub real_url: Option<String>,
    pub info: Vec<(String, String)>,
    pub html: String,
}

impl FetchState {
    fn new(url: &str, timeout: Duration) -> Self {
        Self {
            phase: FetchPhase::Idle,
            url: url.to_string(),
            tries: 0,
            timeout,
            error: None,
            response_code: None,
            real_url: None,
            info: Vec::new(),
            html: String::new(),
        }
    }

    fn give_up(&mut self) {
        self.phase = FetchPhase::Exhausted;
        self.html = NO_RESPONSE.to_string();
    }
}

/// Blocking GET with a bounded retry loop.
///
/// Every failed attempt doubles the timeout of the next one. Ordinary
/// network failures never surface as errors from [`FetchAgent::fetch`]:
/// the caller gets [`NO_RESPONSE`] and checks [`FetchAgent::ok`].
pub struct FetchAgent<T = ReqwestTransport> {
    transport: T,
    config: FetchConfig,
    state: FetchState,
}

impl FetchAgent<ReqwestTransport> {
    /// Agent using a blocking `reqwest` client.
    pub fn new(config: FetchConfig) -> Result<Self, MarketDataError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, config))
    }
}

impl<T: HttpTransport> FetchAgent<T> {
    pub fn with_transport(transport: T, config: FetchConfig) -> Self {
        let config = config.sanitized();
        Self {
            transport,
            state: FetchState::new("", config.initial_timeout),
            config,
        }
    }

    /// Fetch `url` and return the body, or [`NO_RESPONSE`] when every
    /// attempt failed.
    ///
    /// A URL that does not parse as an absolute URL is rejected before any
    /// attempt is made.
    pub fn fetch(&mut self, url: &str) -> String {
        self.state = FetchState::new(url, self.config.initial_timeout);

        if let Err(e) = reqwest::Url::parse(url) {
            warn!("Rejected url '{}': {}", url, e);
            self.state.error = Some(MarketDataError::InvalidUrl {
                url: url.to_string(),
                message: e.to_string(),
            });
            self.state.give_up();
            return self.state.html.clone();
        }

        loop {
            self.state.tries += 1;
            self.state.phase = FetchPhase::Trying;
            debug!(
                "try {}/{}/{:?}",
                self.state.tries, self.config.max_attempts, self.state.timeout
            );

            let request = HttpRequest {
                url,
                headers: &REQUEST_HEADERS,
                timeout: self.state.timeout,
            };

            match self.transport.get(&request) {
                Ok(response) => {
                    info!(
                        "Fetched {} ({}) after {} attempt(s)",
                        url, response.status, self.state.tries
                    );
                    self.state.phase = FetchPhase::Succeeded;
                    self.state.error = None;
                    self.state.response_code = Some(response.status);
                    self.state.real_url = Some(response.real_url);
                    self.state.info = response.headers;
                    self.state.html = response.body;
                    return self.state.html.clone();
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} for {} failed: {}",
                        self.state.tries, self.config.max_attempts, url, e
                    );
                    if let TransportError::Status(code) = &e {
                        self.state.response_code = Some(*code);
                    }
                    let error = MarketDataError::from(e);
                    let retry_class = error.retry_class();
                    self.state.error = Some(error);

                    if retry_class == RetryClass::Never
                        || self.state.tries >= self.config.max_attempts
                    {
                        self.state.give_up();
                        return self.state.html.clone();
                    }

                    self.state.phase = FetchPhase::Retrying;
                    self.state.timeout = self.state.timeout.saturating_mul(2);
                }
            }
        }
    }
}

impl<T> FetchAgent<T> {
    /// True iff the last fetch read a 2xx response.
    pub fn ok(&self) -> bool {
        self.state.phase == FetchPhase::Succeeded
    }

    /// Outcome of the last fetch as a `Result`.
    pub fn outcome(&self) -> Result<&str, MarketDataError> {
        match self.state.phase {
            FetchPhase::Succeeded => Ok(&self.state.html),
            FetchPhase::Idle => Err(MarketDataError::NotFetched),
            FetchPhase::Trying | FetchPhase::Retrying | FetchPhase::Exhausted => {
                match (&self.state.error, self.state.tries) {
                    (Some(error), 0) => Err(error.clone()),
                    _ => Err(MarketDataError::Exhausted {
                        attempts: self.state.tries,
                    }),
                }
            }
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn phase(&self) -> FetchPhase {
        self.state.phase
    }

    pub fn url(&self) -> &str {
        &self.state.url
    }

    pub fn real_url(&self) -> Option<&str> {
        self.state.real_url.as_deref()
    }

    pub fn response_code(&self) -> Option<u16> {
        self.state.response_code
    }

    /// Last error recorded, cleared by a successful attempt.
    pub fn error(&self) -> Option<&MarketDataError> {
        self.state.error.as_ref()
    }

    /// Response headers of the successful attempt.
    pub fn info(&self) -> &[(String, String)] {
        &self.state.info
    }

    /// Body of the last fetch (the sentinel after a failure).
    pub fn html(&self) -> &str {
        &self.state.html
    }

    pub fn tries(&self) -> u32 {
        self.state.tries
    }

    pub fn timeout(&self) -> Duration {
        self.state.timeout
    }
}

impl<T> fmt::Display for FetchAgent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self
            .state
            .response_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(f, "status: {} ({})", status, self.state.phase)?;
        writeln!(
            f,
            "tries: {}/{}/{:?}",
            self.state.tries, self.config.max_attempts, self.state.timeout
        )?;
        match &self.state.error {
            Some(error) => writeln!(f, "error: {}", error)?,
            None => writeln!(f, "error: -")?,
        }
        writeln!(f, "url: {}", self.state.url)?;
        writeln!(f, "realurl: {}", self.state.real_url.as_deref().unwrap_or("-"))?;
        let info = self
            .state
            .info
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "info: {}", info)
    }
}
