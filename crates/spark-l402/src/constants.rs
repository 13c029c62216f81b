use std::time::Duration;

/// Authorization scheme presented on the paid retry.
pub const AUTH_SCHEME: &str = "L402";

/// JSON keys that may carry the BOLT11 invoice, in lookup order.
pub const INVOICE_KEYS: [&str; 3] = ["invoice", "payment_request", "pr"];

/// JSON keys that may carry the access token, in lookup order.
pub const TOKEN_KEYS: [&str; 2] = ["macaroon", "token"];

/// Routing fee ceiling used when the caller does not pick one.
pub const DEFAULT_MAX_FEE_SATS: u64 = 10;

/// Delay between preimage status queries.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Number of status queries before giving up on settlement.
pub const POLL_ATTEMPTS: u32 = 15;

/// Millisatoshis per satoshi.
pub const MSATS_PER_SAT: u64 = 1_000;

/// Bounds for the preimage poll loop.
///
/// Polling always sleeps `interval` before each query, so a payment that never
/// reaches a terminal status gives up after exactly `interval * attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub attempts: u32,
}

impl PollConfig {
    pub fn new(interval: Duration, attempts: u32) -> Self {
        Self { interval, attempts }
    }

    /// Wall-clock time spent sleeping when every attempt is used.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.attempts)
    }
}

impl Default for PollConfig {
    /// 15 attempts at 500 ms.
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            attempts: POLL_ATTEMPTS,
        }
    }
}
