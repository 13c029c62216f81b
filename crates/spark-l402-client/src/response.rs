use l402::{L402Error, PaymentProof};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

/// Response body, decoded according to its `Content-Type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// `application/json` bodies are parsed; anything else is read as text.
    pub async fn read(resp: reqwest::Response) -> Result<Self, L402Error> {
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);

        if is_json {
            resp.json::<Value>()
                .await
                .map(ResponseBody::Json)
                .map_err(|e| L402Error::HttpError(format!("failed to parse JSON body: {e}")))
        } else {
            resp.text()
                .await
                .map(ResponseBody::Text)
                .map_err(|e| L402Error::HttpError(format!("failed to read body: {e}")))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }
}

/// Result of [`L402Client::fetch_with_payment`](crate::L402Client::fetch_with_payment).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// Whether an invoice was paid to obtain `data`.
    pub paid: bool,
    /// HTTP status of the final response.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_sats: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<PaymentProof>,
    pub data: ResponseBody,
}

/// What a resource would cost, without paying for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPreview {
    pub requires_payment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_sats: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl CostPreview {
    pub fn free() -> Self {
        Self {
            requires_payment: false,
            amount_sats: None,
            invoice: None,
            access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(ResponseBody::Json(json!({"joke": "ha"}))).unwrap(),
            json!({"joke": "ha"})
        );
        assert_eq!(
            serde_json::to_value(ResponseBody::Text("plain".to_string())).unwrap(),
            json!("plain")
        );
    }

    #[test]
    fn test_free_preview_omits_challenge_fields() {
        assert_eq!(
            serde_json::to_value(CostPreview::free()).unwrap(),
            json!({"requiresPayment": false})
        );
    }
}
