//! L402 client SDK for paying Lightning-gated HTTP APIs.
//!
//! This crate provides a high-level client for L402-protected resources.
//! It handles the HTTP 402 flow automatically: request -> 402 -> pay invoice
//! -> wait for preimage -> retry with `Authorization: L402 <token>:<preimage>`.
//!
//! # Quick Example
//!
//! ```no_run
//! use l402_client::{ExecutorConfig, ExecutorWallet, L402Client, L402Request};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let wallet = ExecutorWallet::new(ExecutorConfig::new("http://127.0.0.1:8788").unwrap()).unwrap();
//! let client = L402Client::new(&wallet).unwrap();
//!
//! let outcome = client
//!     .fetch_with_payment(&L402Request::get("https://lightningfaucet.com/api/l402/joke"))
//!     .await
//!     .unwrap();
//!
//! if outcome.paid {
//!     println!("Paid {} sats", outcome.amount_sats.unwrap_or_default());
//! }
//! # }
//! ```

pub mod cli;
pub mod config;
mod http_client;
mod request;
mod response;

pub use config::ClientConfig;
pub use http_client::{build_http_client, preview_cost, L402Client};
pub use request::L402Request;
pub use response::{CostPreview, FetchOutcome, ResponseBody};

// Re-export commonly needed types from core
pub use l402::{
    Bolt11Decoder, InvoiceDecoder, L402Error, LightningSend, LightningSendStatus,
    LightningWallet, PaymentChallenge, PaymentProof, PollConfig, DEFAULT_MAX_FEE_SATS,
};
pub use l402_wallet::{ExecutorConfig, ExecutorWallet};
