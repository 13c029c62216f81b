//! L402 payment protocol primitives for Spark / Lightning wallets.
//!
//! Implements the client half of HTTP 402 pay-to-access: a resource server
//! answers with a BOLT11 invoice and an access token (macaroon), the client
//! pays the invoice and presents `L402 <token>:<preimage>` on retry.
//!
//! # Pieces
//!
//! - **Challenge** ([`PaymentChallenge`]): parsed from the 402 JSON body
//! - **Invoice** ([`InvoiceDecoder`], [`Bolt11Decoder`]): extracts the amount
//! - **Wallet** ([`LightningWallet`]): the injected payment capability
//! - **Settlement** ([`settlement`]): the bounded preimage poll loop
//!
//! The HTTP flow itself lives in the `spark-l402-client` crate.
//!
//! # Quick example
//!
//! ```
//! use l402::{Bolt11Decoder, DecodedInvoiceAmount, InvoiceDecoder, PaymentChallenge};
//!
//! let body = serde_json::json!({ "pr": "lnbc15n1pjq0rtz", "macaroon": "AgEL" });
//! let challenge = PaymentChallenge::from_json(&body).unwrap();
//!
//! let decoded = Bolt11Decoder.decode(&challenge.invoice).unwrap();
//! let amount = DecodedInvoiceAmount::from_decoded(&decoded).unwrap();
//! assert_eq!(amount.sats(), 2);
//! ```

pub mod challenge;
pub mod constants;
pub mod error;
pub mod invoice;
pub mod payment;
pub mod settlement;
pub mod wallet;

// Re-exports
pub use challenge::PaymentChallenge;
pub use constants::*;
pub use error::L402Error;
pub use invoice::{Bolt11Decoder, DecodedInvoice, DecodedInvoiceAmount, InvoiceDecoder};
pub use payment::*;
pub use wallet::LightningWallet;
