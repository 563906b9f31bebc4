/// Classification for retry policy.
///
/// Used by the fetch agent to decide whether a failed attempt is worth
/// repeating.
///
/// # Behavior Summary
///
/// | Class | Another attempt? | Timeout for next attempt |
/// |-------|------------------|--------------------------|
/// | `Never` | No | - |
/// | `WithBackoff` | Yes, while attempts remain | Doubled |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Never retry - the request itself is invalid.
    /// Sending it again cannot produce a different outcome.
    Never,

    /// Retry with a doubled timeout.
    ///
    /// Used for transport failures: timeouts, refused connections and
    /// non-success HTTP statuses. The agent gives up once the configured
    /// attempt budget is spent.
    WithBackoff,
}
