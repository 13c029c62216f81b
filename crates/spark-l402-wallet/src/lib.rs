//! Spark wallet-executor backend for L402 payments.
//!
//! [`ExecutorWallet`] implements [`l402::LightningWallet`] by calling a wallet
//! executor daemon that holds the Spark SDK and the mnemonic. This process
//! never sees key material; it only submits invoices and reads send records.
//!
//! ```no_run
//! use l402_wallet::{ExecutorConfig, ExecutorWallet};
//!
//! # async fn demo() -> Result<(), l402::L402Error> {
//! let config = ExecutorConfig::new("http://127.0.0.1:8788")?.with_auth_token("secret");
//! let wallet = ExecutorWallet::new(config)?;
//! let balance = wallet.balance().await?;
//! println!("{} sats", balance.balance_sats);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod executor;
pub mod types;

pub use config::ExecutorConfig;
pub use executor::ExecutorWallet;
pub use types::{CreateInvoice, TokenBalance, WalletBalance};
