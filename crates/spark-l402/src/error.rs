use thiserror::Error;

/// Errors returned by L402 operations.
#[derive(Debug, Error)]
pub enum L402Error {
    /// The 402 body is not JSON or lacks the invoice or the access token.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("invoice has no amount")]
    MissingInvoiceAmount,

    #[error("invalid invoice: {0}")]
    InvalidInvoice(String),

    /// The wallet reported a routing or settlement failure.
    #[error("payment failed: {0}")]
    PaymentFailed(String),

    /// The poll budget ran out before the payment reached a terminal status.
    #[error("payment {payment_id} not settled after {attempts} status checks")]
    PaymentTimeout { payment_id: String, attempts: u32 },

    /// The wallet reported success without revealing a preimage.
    #[error("payment succeeded but no preimage is available")]
    ProofUnavailable,

    /// The pay request may have reached the wallet, but no answer came back.
    #[error("payment outcome unknown: {0}")]
    PaymentUnconfirmed(String),

    #[error("wallet error: {0}")]
    WalletError(String),

    #[error("http error: {0}")]
    HttpError(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl L402Error {
    /// True when the payment may have been sent but no content was delivered:
    /// the wallet accepted it and then never settled or revealed a preimage,
    /// or the pay request itself went unanswered. Callers should reconcile with
    /// the wallet instead of paying a fresh challenge.
    ///
    /// Errors from status queries while polling keep their own variant and
    /// are not covered here.
    pub fn is_fatal_payment_error(&self) -> bool {
        matches!(
            self,
            L402Error::PaymentTimeout { .. }
                | L402Error::ProofUnavailable
                | L402Error::PaymentUnconfirmed(_)
        )
    }
}
