//! The payment capability injected into the L402 flow.
//!
//! Key management, routing and fee enforcement stay inside the wallet. The
//! flow only submits an invoice and reads back send records.

use std::sync::Arc;

use crate::error::L402Error;
use crate::payment::LightningSend;

/// Wallet able to pay BOLT11 invoices and report on outgoing payments.
pub trait LightningWallet: Send + Sync {
    /// Pay `invoice`, refusing if the routing fee would exceed `max_fee_sats`.
    ///
    /// Returns either a settled record carrying the preimage or an in-flight
    /// record whose id can be passed to [`lightning_send_status`](Self::lightning_send_status).
    fn pay_invoice(
        &self,
        invoice: &str,
        max_fee_sats: u64,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send;

    /// Current state of a previously submitted payment.
    fn lightning_send_status(
        &self,
        payment_id: &str,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send;
}

impl<W: LightningWallet> LightningWallet for &W {
    fn pay_invoice(
        &self,
        invoice: &str,
        max_fee_sats: u64,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send {
        (**self).pay_invoice(invoice, max_fee_sats)
    }

    fn lightning_send_status(
        &self,
        payment_id: &str,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send {
        (**self).lightning_send_status(payment_id)
    }
}

impl<W: LightningWallet> LightningWallet for Arc<W> {
    fn pay_invoice(
        &self,
        invoice: &str,
        max_fee_sats: u64,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send {
        (**self).pay_invoice(invoice, max_fee_sats)
    }

    fn lightning_send_status(
        &self,
        payment_id: &str,
    ) -> impl std::future::Future<Output = Result<LightningSend, L402Error>> + Send {
        (**self).lightning_send_status(payment_id)
    }
}
