//! Quote endpoints.
//!
//! Only Yahoo Finance is implemented: it builds the request URL and
//! extracts price records from the response body. Fetching is done by
//! [`crate::agent`].

pub mod yahoo;
