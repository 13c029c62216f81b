//! Turning a submitted payment into a preimage.
//!
//! Only the status query is repeated here. A payment is never resubmitted:
//! a failed or timed-out send is surfaced to the caller as an error.
//!
//! Both functions are cancel-safe. Wrap them in `tokio::time::timeout` to
//! impose a deadline tighter than the poll budget.

use crate::constants::PollConfig;
use crate::error::L402Error;
use crate::payment::{redact, LightningSend, PaymentOutcome};
use crate::wallet::LightningWallet;

/// Resolve the record returned by `pay_invoice` into a preimage, polling if
/// the payment is still in flight.
pub async fn settle<W: LightningWallet>(
    wallet: &W,
    initial: LightningSend,
    poll: &PollConfig,
) -> Result<String, L402Error> {
    match initial.outcome() {
        Some(PaymentOutcome::Settled(preimage)) => Ok(preimage),
        Some(PaymentOutcome::Failed(reason)) => Err(L402Error::PaymentFailed(reason)),
        Some(PaymentOutcome::Initiated(payment_id)) => {
            tracing::info!("Payment {payment_id} initiated, polling for preimage");
            await_preimage(wallet, &payment_id, poll).await
        }
        None => Err(L402Error::ProofUnavailable),
    }
}

/// Poll `lightning_send_status` until a preimage appears or the payment fails.
///
/// Sleeps `poll.interval` before every query. Returns
/// [`L402Error::PaymentTimeout`] once `poll.attempts` queries have passed
/// without a terminal status, or [`L402Error::ProofUnavailable`] if the
/// wallet reported success but never revealed the preimage.
pub async fn await_preimage<W: LightningWallet>(
    wallet: &W,
    payment_id: &str,
    poll: &PollConfig,
) -> Result<String, L402Error> {
    let mut succeeded_without_proof = false;

    for attempt in 1..=poll.attempts {
        tokio::time::sleep(poll.interval).await;

        let record = wallet.lightning_send_status(payment_id).await?;
        match record.outcome() {
            Some(PaymentOutcome::Settled(preimage)) => {
                tracing::info!(
                    "Payment {payment_id} settled after {attempt} checks, preimage {}",
                    redact(&preimage)
                );
                return Ok(preimage);
            }
            Some(PaymentOutcome::Failed(reason)) => {
                tracing::warn!("Payment {payment_id} failed: {reason}");
                return Err(L402Error::PaymentFailed(reason));
            }
            Some(PaymentOutcome::Initiated(_)) => {
                tracing::debug!(
                    "Payment {payment_id} still {:?} (check {attempt}/{})",
                    record.status,
                    poll.attempts
                );
            }
            None => {
                tracing::debug!("Payment {payment_id} succeeded, waiting for preimage");
                succeeded_without_proof = true;
            }
        }
    }

    if succeeded_without_proof {
        return Err(L402Error::ProofUnavailable);
    }

    Err(L402Error::PaymentTimeout {
        payment_id: payment_id.to_string(),
        attempts: poll.attempts,
    })
}
