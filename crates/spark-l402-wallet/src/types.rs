use l402::{LightningSend, LightningSendStatus};
use serde::{Deserialize, Serialize};

const DEFAULT_INVOICE_EXPIRY_SECS: u64 = 3600;

/// Response envelope used by every executor route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T> {
    pub ok: bool,
    pub request_id: Option<String>,
    pub result: Option<T>,
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Lightning send request as stored by the Spark SDK.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendRecord {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub payment_preimage: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl From<SendRecord> for LightningSend {
    fn from(record: SendRecord) -> Self {
        LightningSend {
            status: LightningSendStatus::from_sdk_status(&record.status),
            id: record.id,
            preimage: record.payment_preimage,
            failure_reason: record.failure_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvoiceRecord {
    pub encoded_invoice: String,
}

/// Sats and token holdings reported by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub balance_sats: u64,
    #[serde(default)]
    pub token_balances: Vec<TokenBalance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub token_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Base units as a decimal string; token supplies exceed 64 bits.
    pub balance: String,
}

/// Parameters for a receiving Lightning invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoice {
    pub amount_sats: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    pub expiry_seconds: u64,
    /// Embed the Spark address so Spark-aware payers can skip Lightning.
    pub include_spark_address: bool,
}

impl CreateInvoice {
    pub fn new(amount_sats: u64) -> Self {
        Self {
            amount_sats,
            memo: None,
            expiry_seconds: DEFAULT_INVOICE_EXPIRY_SECS,
            include_spark_address: true,
        }
    }

    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn expiry_seconds(mut self, seconds: u64) -> Self {
        self.expiry_seconds = seconds;
        self
    }
}
