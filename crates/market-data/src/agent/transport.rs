//! Blocking HTTP transport used by the fetch agent.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::errors::{MarketDataError, TransportError};

/// Headers sent with every quote request.
///
/// `Accept-Encoding: none` keeps the body uncompressed.
pub const REQUEST_HEADERS: [(&str, &str); 6] = [
    (
        "User-Agent",
        "Mozilla/5.0 AppleWebKit/537.11 (KHTML, like Gecko) Chrome/23.0.1271.64 Safari/537.11",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("Accept-Charset", "ISO-8859-1,utf-8;q=0.7,*;q=0.3"),
    ("Accept-Encoding", "none"),
    ("Accept-Language", "en-US,en;q=0.8"),
    ("Connection", "keep-alive"),
];

/// One GET attempt.
#[derive(Clone, Debug)]
pub struct HttpRequest<'a> {
    pub url: &'a str,
    pub headers: &'a [(&'static str, &'static str)],
    pub timeout: Duration,
}

/// A successful (2xx) response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL after redirects
    pub real_url: String,
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
}

/// Performs a single blocking GET.
///
/// Implementations return `Err` for anything other than a 2xx response read
/// in full; the agent decides whether to try again.
pub trait HttpTransport {
    fn get(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .build()
            .map_err(|e| MarketDataError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, request: &HttpRequest<'_>) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(request.url).timeout(request.timeout);
        for (name, value) in request.headers {
            builder = builder.header(*name, *value);
        }

        let response = builder
            .send()
            .map_err(|e| map_reqwest_error(e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let real_url = response.url().to_string();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let bytes = response
            .bytes()
            .map_err(|e| map_reqwest_error(e, request.timeout))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            real_url,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(timeout)
    } else if let Some(status) = error.status() {
        TransportError::Status(status.as_u16())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_builder() {
        TransportError::Request(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
