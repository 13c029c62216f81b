use std::time::Duration;

use l402::payment::redact;
use l402::{
    settlement, Bolt11Decoder, DecodedInvoiceAmount, InvoiceDecoder, L402Error, LightningWallet,
    PaymentChallenge, PaymentProof, PollConfig,
};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;

use crate::request::L402Request;
use crate::response::{CostPreview, FetchOutcome, ResponseBody};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client that automatically handles 402 payment responses.
///
/// Wraps `reqwest::Client`. On a 402 response, it parses the challenge,
/// pays the invoice through the provided [`LightningWallet`], waits for the
/// preimage, and retries the request with an `Authorization: L402` header.
///
/// The wallet stays owned by the caller: pass `&wallet` or an `Arc`.
pub struct L402Client<W: LightningWallet, D: InvoiceDecoder = Bolt11Decoder> {
    http: reqwest::Client,
    wallet: W,
    decoder: D,
    poll: PollConfig,
}

impl<W: LightningWallet> L402Client<W> {
    /// Client with a 30 s request timeout and redirects disabled.
    pub fn new(wallet: W) -> Result<Self, L402Error> {
        Ok(Self::with_http_client(
            wallet,
            build_http_client(DEFAULT_HTTP_TIMEOUT)?,
        ))
    }

    /// Create a client with a custom reqwest::Client.
    pub fn with_http_client(wallet: W, http: reqwest::Client) -> Self {
        Self {
            http,
            wallet,
            decoder: Bolt11Decoder,
            poll: PollConfig::default(),
        }
    }
}

impl<W: LightningWallet, D: InvoiceDecoder> L402Client<W, D> {
    /// Swap the invoice decoding capability.
    pub fn with_decoder<D2: InvoiceDecoder>(self, decoder: D2) -> L402Client<W, D2> {
        L402Client {
            http: self.http,
            wallet: self.wallet,
            decoder,
            poll: self.poll,
        }
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Fetch a resource, paying its L402 challenge if one is returned.
    ///
    /// At most one payment is submitted per call. A failed, timed-out or
    /// proof-less payment ends the call with an error; nothing is retried
    /// except the status poll.
    pub async fn fetch_with_payment(
        &self,
        request: &L402Request,
    ) -> Result<FetchOutcome, L402Error> {
        // First request
        let resp = self.send(request, None).await?;

        if resp.status() != StatusCode::PAYMENT_REQUIRED {
            let status = resp.status().as_u16();
            return Ok(FetchOutcome {
                paid: false,
                status,
                amount_sats: None,
                proof: None,
                data: ResponseBody::read(resp).await?,
            });
        }

        tracing::info!("Got 402 Payment Required from {}, parsing challenge", request.url);
        let (challenge, amount) = read_challenge(resp, &self.decoder).await?;
        tracing::info!("Invoice amount: {} sats", amount.sats());

        // Pay exactly once
        let send = self
            .wallet
            .pay_invoice(&challenge.invoice, request.max_fee_sats)
            .await?;
        let preimage = settlement::settle(&self.wallet, send, &self.poll).await?;
        tracing::info!("Payment complete, preimage {}", redact(&preimage));

        // Retry with proof
        let proof = PaymentProof::new(preimage, challenge.access_token);
        let mut authorization = HeaderValue::from_str(&proof.authorization()).map_err(|_| {
            // Token was checked with the challenge; only the preimage can be invalid here
            tracing::warn!("Wallet returned a preimage that cannot be sent in a header");
            L402Error::ProofUnavailable
        })?;
        authorization.set_sensitive(true);
        let resp = self.send(request, Some(authorization)).await?;
        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("Paid retry to {} returned {}", request.url, status);
        }

        Ok(FetchOutcome {
            paid: true,
            status: status.as_u16(),
            amount_sats: Some(amount.sats()),
            proof: Some(proof),
            data: ResponseBody::read(resp).await?,
        })
    }

    /// Report whether `url` is payment-gated and at what price. Never pays.
    pub async fn preview_cost(&self, url: &str) -> Result<CostPreview, L402Error> {
        preview_cost(&self.http, &self.decoder, url).await
    }

    /// Poll an already submitted payment with a fresh budget.
    ///
    /// For callers that received [`L402Error::PaymentTimeout`]; returns the
    /// preimage once the payment settles.
    pub async fn resume_settlement(&self, payment_id: &str) -> Result<String, L402Error> {
        settlement::await_preimage(&self.wallet, payment_id, &self.poll).await
    }

    async fn send(
        &self,
        request: &L402Request,
        authorization: Option<HeaderValue>,
    ) -> Result<reqwest::Response, L402Error> {
        let mut headers = request.header_map()?;
        let paid = authorization.is_some();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, value);
        }

        let mut req = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(headers);
        if let Some(body) = request.body_bytes()? {
            req = req.body(body);
        }

        let stage = if paid { "paid request" } else { "request" };
        req.send()
            .await
            .map_err(|e| L402Error::HttpError(format!("{stage} failed: {e}")))
    }
}

/// Build the `reqwest::Client` used for paywalled requests.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, L402Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| L402Error::ConfigError(format!("failed to build HTTP client: {e}")))
}

/// Issue a plain GET and decode any 402 challenge without paying.
///
/// Usable without a wallet.
pub async fn preview_cost<D: InvoiceDecoder>(
    http: &reqwest::Client,
    decoder: &D,
    url: &str,
) -> Result<CostPreview, L402Error> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| L402Error::HttpError(format!("request failed: {e}")))?;

    if resp.status() != StatusCode::PAYMENT_REQUIRED {
        return Ok(CostPreview::free());
    }

    let (challenge, amount) = read_challenge(resp, decoder).await?;
    Ok(CostPreview {
        requires_payment: true,
        amount_sats: Some(amount.sats()),
        invoice: Some(challenge.invoice),
        access_token: Some(challenge.access_token),
    })
}

async fn read_challenge<D: InvoiceDecoder>(
    resp: reqwest::Response,
    decoder: &D,
) -> Result<(PaymentChallenge, DecodedInvoiceAmount), L402Error> {
    let body = resp
        .bytes()
        .await
        .map_err(|e| L402Error::HttpError(format!("failed to read 402 body: {e}")))?;
    let challenge = PaymentChallenge::from_slice(&body)?;
    let decoded = decoder.decode(&challenge.invoice)?;
    let amount = DecodedInvoiceAmount::from_decoded(&decoded)?;
    Ok((challenge, amount))
}
