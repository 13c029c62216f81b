//! BOLT11 amount decoding.
//!
//! Only the human-readable part of the invoice is inspected. Signature and
//! tagged-field validation is left to the wallet that pays the invoice.

use crate::constants::MSATS_PER_SAT;
use crate::error::L402Error;

/// Structured sections of an encoded invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInvoice {
    /// Currency code from the human-readable part, e.g. `bc`, `tb`, `bcrt`.
    pub currency: String,
    /// Amount in millisatoshis. `None` for amountless invoices.
    pub amount_msats: Option<u64>,
}

/// Invoice decoding capability.
pub trait InvoiceDecoder: Send + Sync {
    /// Decode an encoded invoice string.
    fn decode(&self, invoice: &str) -> Result<DecodedInvoice, L402Error>;
}

/// Decoder for the BOLT11 human-readable part.
#[derive(Debug, Default, Clone, Copy)]
pub struct Bolt11Decoder;

impl InvoiceDecoder for Bolt11Decoder {
    fn decode(&self, invoice: &str) -> Result<DecodedInvoice, L402Error> {
        let trimmed = invoice.trim();
        let without_scheme = strip_prefix_ignore_case(trimmed, "lightning:").unwrap_or(trimmed);
        let lowered = without_scheme.to_ascii_lowercase();

        // bech32: the separator is the last '1'; the data charset never contains it.
        let Some(separator) = lowered.rfind('1') else {
            return Err(L402Error::InvalidInvoice("missing bech32 separator".to_string()));
        };
        if separator + 1 == lowered.len() {
            return Err(L402Error::InvalidInvoice("empty data part".to_string()));
        }

        let Some(rest) = lowered[..separator].strip_prefix("ln") else {
            return Err(L402Error::InvalidInvoice("missing `ln` prefix".to_string()));
        };

        let currency_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_lowercase())
            .count();
        if currency_len == 0 {
            return Err(L402Error::InvalidInvoice("missing currency code".to_string()));
        }
        let (currency, amount_part) = rest.split_at(currency_len);

        Ok(DecodedInvoice {
            currency: currency.to_string(),
            amount_msats: parse_amount(amount_part)?,
        })
    }
}

/// Positive invoice amount in millisatoshis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DecodedInvoiceAmount(u64);

impl DecodedInvoiceAmount {
    /// Extract the amount, rejecting amountless and zero-amount invoices.
    pub fn from_decoded(decoded: &DecodedInvoice) -> Result<Self, L402Error> {
        match decoded.amount_msats {
            Some(msats) if msats > 0 => Ok(Self(msats)),
            _ => Err(L402Error::MissingInvoiceAmount),
        }
    }

    pub fn msats(&self) -> u64 {
        self.0
    }

    /// Whole satoshis, rounded up so a payer never under-pays.
    pub fn sats(&self) -> u64 {
        self.0.div_ceil(MSATS_PER_SAT)
    }
}

fn parse_amount(part: &str) -> Result<Option<u64>, L402Error> {
    if part.is_empty() {
        return Ok(None);
    }

    let digits_len = part.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(L402Error::InvalidInvoice(format!(
            "unexpected amount `{part}`"
        )));
    }
    let (digits, multiplier) = part.split_at(digits_len);
    let amount: u64 = digits
        .parse()
        .map_err(|_| L402Error::InvalidInvoice(format!("amount `{digits}` out of range")))?;

    let overflow = || L402Error::InvalidInvoice(format!("amount `{part}` overflows"));
    let msats = match multiplier {
        "" => amount.checked_mul(100_000_000_000).ok_or_else(overflow)?,
        "m" => amount.checked_mul(100_000_000).ok_or_else(overflow)?,
        "u" => amount.checked_mul(100_000).ok_or_else(overflow)?,
        "n" => amount.checked_mul(100).ok_or_else(overflow)?,
        "p" => {
            if amount % 10 != 0 {
                return Err(L402Error::InvalidInvoice(format!(
                    "amount `{part}` is not a whole millisatoshi"
                )));
            }
            amount / 10
        }
        other => {
            return Err(L402Error::InvalidInvoice(format!(
                "unknown multiplier `{other}`"
            )))
        }
    };

    Ok(Some(msats))
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}
