use l402::{L402Error, DEFAULT_MAX_FEE_SATS};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

/// A request to a possibly payment-gated resource.
///
/// Sent with `Content-Type: application/json` unless a caller header
/// replaces it. The same request is replayed verbatim on the paid retry.
#[derive(Debug, Clone)]
pub struct L402Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Routing fee ceiling handed to the wallet.
    pub max_fee_sats: u64,
}

impl L402Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            max_fee_sats: DEFAULT_MAX_FEE_SATS,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// JSON body, serialized on every send.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn max_fee_sats(mut self, max_fee_sats: u64) -> Self {
        self.max_fee_sats = max_fee_sats;
        self
    }

    /// Default headers overlaid with caller headers; later entries replace earlier ones.
    pub(crate) fn header_map(&self) -> Result<HeaderMap, L402Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| L402Error::InvalidRequest(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value.trim())
                .map_err(|_| L402Error::InvalidRequest(format!("invalid value for header {name}")))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    pub(crate) fn body_bytes(&self) -> Result<Option<Vec<u8>>, L402Error> {
        self.body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(L402Error::from)
    }
}
