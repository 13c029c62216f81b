//! Parsing of the JSON body that accompanies an HTTP 402 response.

use serde_json::Value;

use crate::constants::{INVOICE_KEYS, TOKEN_KEYS};
use crate::error::L402Error;

/// Invoice and access token issued by a 402 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentChallenge {
    /// BOLT11-encoded invoice.
    pub invoice: String,
    /// Opaque credential, usually a macaroon.
    pub access_token: String,
}

impl PaymentChallenge {
    /// Parse a challenge from a decoded JSON body.
    ///
    /// The invoice is looked up under `invoice`, `payment_request`, then `pr`;
    /// the token under `macaroon`, then `token`. Missing, empty and non-string
    /// values fall through to the next key. A token containing control
    /// characters is rejected, since it could not be presented in a header.
    pub fn from_json(body: &Value) -> Result<Self, L402Error> {
        let Some(object) = body.as_object() else {
            return Err(L402Error::MalformedChallenge(
                "402 body is not a JSON object".to_string(),
            ));
        };

        let invoice = first_string(object, &INVOICE_KEYS);
        let access_token = first_string(object, &TOKEN_KEYS);

        match (invoice, access_token) {
            (Some(_), Some(access_token)) if !is_header_safe(access_token) => Err(
                L402Error::MalformedChallenge(
                    "macaroon contains characters not allowed in a header".to_string(),
                ),
            ),
            (Some(invoice), Some(access_token)) => Ok(Self {
                invoice: invoice.to_string(),
                access_token: access_token.to_string(),
            }),
            (None, Some(_)) => Err(L402Error::MalformedChallenge(
                "missing invoice".to_string(),
            )),
            (Some(_), None) => Err(L402Error::MalformedChallenge(
                "missing macaroon".to_string(),
            )),
            (None, None) => Err(L402Error::MalformedChallenge(
                "missing invoice and macaroon".to_string(),
            )),
        }
    }

    /// Parse a challenge from a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, L402Error> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| L402Error::MalformedChallenge(format!("402 body is not JSON: {e}")))?;
        Self::from_json(&value)
    }
}

fn first_string<'a>(object: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
}

/// Same rule as an HTTP header value: no ASCII control characters except tab.
/// Tab is refused too, as a macaroon never contains whitespace.
fn is_header_safe(token: &str) -> bool {
    !token.chars().any(|c| c.is_ascii_control())
}
