//! Command line front end for the `l402` binary.

use clap::Parser;
use l402::{Bolt11Decoder, L402Error, LightningWallet};
use l402_wallet::{CreateInvoice, ExecutorWallet};
use reqwest::Method;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::http_client::{build_http_client, preview_cost, L402Client};
use crate::request::L402Request;

#[derive(Parser, Debug)]
#[command(name = "l402")]
#[command(about = "Pay for L402-gated HTTP resources with a Spark wallet")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show what a URL would cost without paying
    Preview { url: String },
    /// Fetch a URL, paying its L402 invoice if one is demanded
    Fetch {
        url: String,
        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,
        /// Extra header as `Name: value` (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
        /// JSON request body
        #[arg(short = 'd', long)]
        data: Option<String>,
        /// Routing fee ceiling per payment
        #[arg(long, env = "L402_MAX_FEE_SATS")]
        max_fee_sats: Option<u64>,
    },
    /// Look up a Lightning send request by id
    Status { payment_id: String },
    /// Show wallet balance
    Balance,
    /// Create a receiving invoice
    Invoice {
        amount_sats: u64,
        #[arg(long)]
        memo: Option<String>,
        #[arg(long, default_value_t = 3600)]
        expiry_secs: u64,
    },
}

/// Execute a parsed command and return its JSON output.
pub async fn run(cli: Cli) -> Result<Value, L402Error> {
    let config = ClientConfig::from_env()?;

    match cli.command {
        Command::Preview { url } => {
            let http = build_http_client(config.http_timeout)?;
            let preview = preview_cost(&http, &Bolt11Decoder, &url).await?;
            Ok(serde_json::to_value(preview)?)
        }
        Command::Fetch {
            url,
            method,
            headers,
            data,
            max_fee_sats,
        } => {
            let request = build_request(
                &url,
                &method,
                &headers,
                data.as_deref(),
                max_fee_sats.unwrap_or(config.max_fee_sats),
            )?;
            let wallet = ExecutorWallet::from_env()?;
            let client =
                L402Client::with_http_client(&wallet, build_http_client(config.http_timeout)?);
            let outcome = client.fetch_with_payment(&request).await?;
            Ok(serde_json::to_value(outcome)?)
        }
        Command::Status { payment_id } => {
            let wallet = ExecutorWallet::from_env()?;
            let send = wallet.lightning_send_status(&payment_id).await?;
            Ok(serde_json::to_value(send)?)
        }
        Command::Balance => {
            let wallet = ExecutorWallet::from_env()?;
            Ok(serde_json::to_value(wallet.balance().await?)?)
        }
        Command::Invoice {
            amount_sats,
            memo,
            expiry_secs,
        } => {
            let wallet = ExecutorWallet::from_env()?;
            let mut params = CreateInvoice::new(amount_sats).expiry_seconds(expiry_secs);
            if let Some(memo) = memo {
                params = params.memo(memo);
            }
            let invoice = wallet.create_invoice(&params).await?;
            Ok(serde_json::json!({ "invoice": invoice }))
        }
    }
}

/// Split a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), L402Error> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| L402Error::InvalidRequest(format!("header must be `Name: value`: {raw}")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(L402Error::InvalidRequest(format!("empty header name: {raw}")));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn build_request(
    url: &str,
    method: &str,
    headers: &[String],
    data: Option<&str>,
    max_fee_sats: u64,
) -> Result<L402Request, L402Error> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| L402Error::InvalidRequest(format!("invalid HTTP method: {method}")))?;

    let mut request = L402Request::new(method, url).max_fee_sats(max_fee_sats);
    for raw in headers {
        let (name, value) = parse_header(raw)?;
        request = request.header(name, value);
    }
    if let Some(data) = data {
        let body: Value = serde_json::from_str(data)
            .map_err(|e| L402Error::InvalidRequest(format!("request body is not JSON: {e}")))?;
        request = request.json(body);
    }
    Ok(request)
}
