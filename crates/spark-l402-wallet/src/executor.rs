use l402::{L402Error, LightningSend, LightningWallet};
use serde::de::DeserializeOwned;

use crate::config::ExecutorConfig;
use crate::types::{CreateInvoice, Envelope, InvoiceRecord, SendRecord, WalletBalance};

/// Lightning wallet backed by a remote Spark wallet executor.
///
/// Routes:
/// - `POST /pay-bolt11`: submit an invoice
/// - `GET /lightning-send/{id}`: read a send request
/// - `GET /balance`: sats and token balances
/// - `POST /create-invoice`: receive-side BOLT11 invoice
pub struct ExecutorWallet {
    http: reqwest::Client,
    config: ExecutorConfig,
}

impl ExecutorWallet {
    pub fn new(config: ExecutorConfig) -> Result<Self, L402Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| L402Error::ConfigError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Build from `SPARK_WALLET_*` environment variables.
    pub fn from_env() -> Result<Self, L402Error> {
        Self::new(ExecutorConfig::from_env()?)
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub async fn balance(&self) -> Result<WalletBalance, L402Error> {
        let request_id = new_request_id();
        let request = self.http.get(self.config.endpoint("balance"));
        self.call(request, &request_id, false).await
    }

    /// Create a receiving invoice and return its BOLT11 encoding.
    pub async fn create_invoice(&self, invoice: &CreateInvoice) -> Result<String, L402Error> {
        if invoice.amount_sats == 0 {
            return Err(L402Error::InvalidRequest(
                "amount must be greater than zero".to_string(),
            ));
        }

        let request_id = new_request_id();
        let body = serde_json::json!({
            "requestId": request_id,
            "invoice": invoice,
        });
        let request = self
            .http
            .post(self.config.endpoint("create-invoice"))
            .json(&body);

        let record: InvoiceRecord = self.call(request, &request_id, false).await?;
        Ok(record.encoded_invoice)
    }

    /// `moves_funds` marks the pay route: once that request may have been
    /// delivered, a missing or unreadable answer is [`L402Error::PaymentUnconfirmed`].
    async fn call<T: DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
        request_id: &str,
        moves_funds: bool,
    ) -> Result<T, L402Error> {
        request = request.header("x-request-id", request_id);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await.map_err(|e| {
            let message = format!("wallet executor request failed: {e}");
            if moves_funds && !e.is_connect() && !e.is_builder() {
                tracing::warn!("Pay request {request_id} unanswered: {e}");
                L402Error::PaymentUnconfirmed(message)
            } else {
                L402Error::WalletError(message)
            }
        })?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(L402Error::WalletError(
                "wallet executor authentication failed".to_string(),
            ));
        }

        let status = resp.status();
        let envelope: Envelope<T> = resp.json().await.map_err(|e| {
            let message = format!("wallet executor response parse failed ({status}): {e}");
            if moves_funds {
                L402Error::PaymentUnconfirmed(message)
            } else {
                L402Error::WalletError(message)
            }
        })?;

        tracing::debug!(
            "Wallet executor answered {} (request {})",
            status,
            envelope.request_id.as_deref().unwrap_or(request_id)
        );

        if !envelope.ok {
            return Err(match envelope.error {
                Some(error) if error.code == "payment_failed" => {
                    L402Error::PaymentFailed(error.message)
                }
                Some(error) => L402Error::WalletError(format!("{}: {}", error.code, error.message)),
                None => L402Error::WalletError(format!("wallet executor returned {status}")),
            });
        }

        envelope
            .result
            .ok_or_else(|| L402Error::WalletError("wallet executor returned no result".to_string()))
    }
}

impl LightningWallet for ExecutorWallet {
    async fn pay_invoice(&self, invoice: &str, max_fee_sats: u64) -> Result<LightningSend, L402Error> {
        let request_id = new_request_id();
        let body = serde_json::json!({
            "requestId": request_id,
            "payment": {
                "invoice": invoice,
                "maxFeeSats": max_fee_sats,
                "preferSpark": true,
            },
        });
        let request = self
            .http
            .post(self.config.endpoint("pay-bolt11"))
            .json(&body);

        let record: SendRecord = self.call(request, &request_id, true).await?;
        tracing::info!("Submitted Lightning payment {} ({})", record.id, record.status);
        Ok(record.into())
    }

    async fn lightning_send_status(&self, payment_id: &str) -> Result<LightningSend, L402Error> {
        let request_id = new_request_id();
        let path = format!("lightning-send/{}", urlencoding::encode(payment_id));
        let request = self.http.get(self.config.endpoint(&path));

        let record: SendRecord = self.call(request, &request_id, false).await?;
        Ok(record.into())
    }
}

fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
