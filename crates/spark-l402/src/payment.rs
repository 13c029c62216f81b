use serde::{Deserialize, Serialize};

use crate::constants::AUTH_SCHEME;

/// Lifecycle state of an outgoing Lightning payment as reported by the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightningSendStatus {
    /// Submitted to the network; settlement is asynchronous.
    Initiated,
    /// Accepted by the wallet but not yet routed.
    Pending,
    Succeeded,
    Failed,
}

impl LightningSendStatus {
    /// Map a Spark SDK send-request status string.
    ///
    /// Unknown statuses are treated as still in flight.
    pub fn from_sdk_status(status: &str) -> Self {
        match status.trim().to_ascii_uppercase().as_str() {
            "LIGHTNING_PAYMENT_INITIATED" => Self::Initiated,
            "LIGHTNING_PAYMENT_SUCCEEDED" | "PREIMAGE_PROVIDED" | "TRANSFER_COMPLETED" => {
                Self::Succeeded
            }
            "LIGHTNING_PAYMENT_FAILED"
            | "TRANSFER_FAILED"
            | "USER_TRANSFER_VALIDATION_FAILED"
            | "PREIMAGE_PROVIDING_FAILED"
            | "USER_SWAP_RETURNED"
            | "USER_SWAP_RETURN_FAILED" => Self::Failed,
            _ => Self::Pending,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Initiated | Self::Pending)
    }
}

/// Send record returned by the wallet for both payment submission and status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightningSend {
    /// Wallet-assigned payment identifier.
    pub id: String,
    pub status: LightningSendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preimage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl LightningSend {
    /// Classify this record.
    ///
    /// A revealed preimage wins over any status. Returns `None` when the
    /// wallet reports success without a preimage.
    pub fn outcome(&self) -> Option<PaymentOutcome> {
        if let Some(preimage) = self.preimage.as_deref().map(str::trim) {
            if !preimage.is_empty() {
                return Some(PaymentOutcome::Settled(preimage.to_string()));
            }
        }

        match self.status {
            LightningSendStatus::Initiated | LightningSendStatus::Pending => {
                Some(PaymentOutcome::Initiated(self.id.clone()))
            }
            LightningSendStatus::Failed => Some(PaymentOutcome::Failed(
                self.failure_reason
                    .clone()
                    .unwrap_or_else(|| "payment failed".to_string()),
            )),
            LightningSendStatus::Succeeded => None,
        }
    }
}

/// Result of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Settlement is asynchronous; carries the payment id to poll.
    Initiated(String),
    /// Settled; carries the hex preimage.
    Settled(String),
    /// Terminal failure; carries the wallet's reason.
    Failed(String),
}

/// Proof of payment presented on the paid retry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProof {
    pub preimage: String,
    pub access_token: String,
}

impl PaymentProof {
    pub fn new(preimage: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            preimage: preimage.into(),
            access_token: access_token.into(),
        }
    }

    /// `Authorization` header value: `L402 <token>:<preimage>`.
    pub fn authorization(&self) -> String {
        format!("{AUTH_SCHEME} {}:{}", self.access_token, self.preimage)
    }
}

impl std::fmt::Debug for PaymentProof {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentProof")
            .field("preimage", &redact(&self.preimage))
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

/// Short prefix of a secret, safe for logs.
pub fn redact(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    if prefix.len() < secret.len() {
        format!("{prefix}...")
    } else {
        "[REDACTED]".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(status: LightningSendStatus, preimage: Option<&str>) -> LightningSend {
        LightningSend {
            id: "ls_1".to_string(),
            status,
            preimage: preimage.map(str::to_string),
            failure_reason: None,
        }
    }

    #[test]
    fn test_sdk_status_mapping() {
        use LightningSendStatus::*;
        assert_eq!(
            LightningSendStatus::from_sdk_status("LIGHTNING_PAYMENT_INITIATED"),
            Initiated
        );
        assert_eq!(
            LightningSendStatus::from_sdk_status("lightning_payment_failed"),
            Failed
        );
        assert_eq!(
            LightningSendStatus::from_sdk_status("TRANSFER_COMPLETED"),
            Succeeded
        );
        assert_eq!(LightningSendStatus::from_sdk_status("CREATED"), Pending);
        assert_eq!(LightningSendStatus::from_sdk_status("SOMETHING_NEW"), Pending);
    }

    #[test]
    fn test_preimage_wins_over_status() {
        let record = send(LightningSendStatus::Initiated, Some("abc123"));
        assert_eq!(
            record.outcome(),
            Some(PaymentOutcome::Settled("abc123".to_string()))
        );
    }

    #[test]
    fn test_in_flight_and_failed_outcomes() {
        assert_eq!(
            send(LightningSendStatus::Pending, Some("")).outcome(),
            Some(PaymentOutcome::Initiated("ls_1".to_string()))
        );

        let mut failed = send(LightningSendStatus::Failed, None);
        assert_eq!(
            failed.outcome(),
            Some(PaymentOutcome::Failed("payment failed".to_string()))
        );
        failed.failure_reason = Some("no route".to_string());
        assert_eq!(
            failed.outcome(),
            Some(PaymentOutcome::Failed("no route".to_string()))
        );
    }

    #[test]
    fn test_success_without_preimage_has_no_outcome() {
        assert_eq!(send(LightningSendStatus::Succeeded, None).outcome(), None);
    }

    #[test]
    fn test_authorization_header_format() {
        let proof = PaymentProof::new("abc123", "AgELbWFjYXJvb24");
        assert_eq!(proof.authorization(), "L402 AgELbWFjYXJvb24:abc123");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let preimage = "f".repeat(64);
        let proof = PaymentProof::new(preimage.clone(), "mac");
        let rendered = format!("{proof:?}");
        assert!(!rendered.contains(&preimage));
        assert!(rendered.contains("ffffffff..."));
        assert!(rendered.contains("[REDACTED]"));
    }
}
