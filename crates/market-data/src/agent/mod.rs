//! Blocking fetch with bounded retries.
//!
//! [`FetchAgent`] issues a GET through an [`HttpTransport`], doubling the
//! timeout after every failed attempt until [`FetchConfig::max_attempts`] is
//! reached. Exhaustion is not an error: the agent returns [`NO_RESPONSE`] and
//! reports `ok() == false`, keeping the last error for diagnostics.
//!
//! ```text
//! attempt   1    2    3    4    5
//! timeout  10s  20s  40s  80s  160s
//! ```

mod config;
mod fetch_agent;
mod transport;

pub use config::{FetchConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT};
pub use fetch_agent::{FetchAgent, FetchPhase, FetchState, NO_RESPONSE};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, REQUEST_HEADERS};
