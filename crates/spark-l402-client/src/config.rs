use std::time::Duration;

use l402::{L402Error, DEFAULT_MAX_FEE_SATS};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client-side settings for the `l402` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Routing fee ceiling per payment
    pub max_fee_sats: u64,
    /// Timeout for requests to the paywalled resource
    pub http_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_fee_sats: DEFAULT_MAX_FEE_SATS,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Read `L402_MAX_FEE_SATS` and `L402_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, L402Error> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, L402Error> {
        let defaults = Self::default();

        let max_fee_sats = match get("L402_MAX_FEE_SATS") {
            Some(raw) => parse_u64("L402_MAX_FEE_SATS", &raw)?,
            None => defaults.max_fee_sats,
        };

        let http_timeout = match get("L402_HTTP_TIMEOUT_SECS") {
            Some(raw) => match parse_u64("L402_HTTP_TIMEOUT_SECS", &raw)? {
                0 => {
                    return Err(L402Error::ConfigError(
                        "L402_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ))
                }
                secs => Duration::from_secs(secs),
            },
            None => defaults.http_timeout,
        };

        Ok(Self {
            max_fee_sats,
            http_timeout,
        })
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, L402Error> {
    raw.trim()
        .parse()
        .map_err(|_| L402Error::ConfigError(format!("invalid {key}: {raw}")))
}
