use l402::L402Error;
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ExecutorConfig {
    /// Base URL of the wallet executor, e.g. `http://127.0.0.1:8788`
    pub base_url: Url,
    /// Bearer token expected by the executor (None = unauthenticated)
    pub auth_token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ExecutorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorConfig")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ExecutorConfig {
    pub fn new(base_url: &str) -> Result<Self, L402Error> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            auth_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `SPARK_WALLET_URL`, `SPARK_WALLET_TOKEN` and `SPARK_WALLET_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, L402Error> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, L402Error> {
        // Required: executor URL
        let base_url = get("SPARK_WALLET_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| L402Error::ConfigError("SPARK_WALLET_URL is required".to_string()))?;

        // Optional: bearer token
        let auth_token = get("SPARK_WALLET_TOKEN").filter(|s| !s.is_empty());

        // Optional: timeout
        let timeout_secs = match get("SPARK_WALLET_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                L402Error::ConfigError(format!("invalid SPARK_WALLET_TIMEOUT_SECS: {raw}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            auth_token,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Absolute URL for an executor route.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_base_url(raw: &str) -> Result<Url, L402Error> {
    let url = Url::parse(raw.trim())
        .map_err(|e| L402Error::ConfigError(format!("invalid wallet executor URL {raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(L402Error::ConfigError(format!(
            "wallet executor URL must be http or https, got {other}"
        ))),
    }
}
