//! Payment URIs for the symbol payload.
//!
//! Wallets scanning a checkout code expect an [EIP-681] URI of the form
//! `ethereum:<address>?value=<wei>&chainId=<id>`. The amount is an integer
//! number of the token's smallest unit, [parse_units] converts the decimal
//! amounts shown to the user.
//!
//! [EIP-681]: https://eips.ethereum.org/EIPS/eip-681
//!
//! # Example
//!
//! ```rust
//! use crypax_qr::uri::{to_wei, PaymentUri};
//!
//! let uri = PaymentUri {
//!     address: "0x71C7656EC7ab88b098defB751B7401B5f6d8976F".into(),
//!     amount_wei: to_wei("0.25")?,
//!     chain_id: 137,
//! };
//! assert_eq!(
//!     uri.to_string(),
//!     "ethereum:0x71C7656EC7ab88b098defB751B7401B5f6d8976F?value=250000000000000000&chainId=137"
//! );
//! # Ok::<(), crypax_qr::uri::AmountError>(())
//! ```
use core::fmt;

pub use alloy_primitives::U256;

/// Decimals of ether and most ERC-20 tokens.
pub const DEFAULT_DECIMALS: usize = 18;

/// Errors when converting a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    /// The amount contains something other than ASCII digits and one `.`.
    #[error("invalid digits in amount {0:?}")]
    InvalidDigits(String),
    /// The amount contains more than one decimal point.
    #[error("more than one decimal point in amount {0:?}")]
    MultipleDecimalPoints(String),
    /// The amount scaled by `10^decimals` does not fit into 256 bits.
    #[error("amount {amount:?} with {decimals} decimals overflows 256 bits")]
    Overflow {
        amount: String,
        decimals: usize,
    },
}

/// A payment request for a native transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentUri {
    /// Receiving address, written as given.
    pub address: String,
    pub amount_wei: U256,
    pub chain_id: u64,
}

impl fmt::Display for PaymentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ethereum:{}?value={}&chainId={}",
            self.address, self.amount_wei, self.chain_id
        )
    }
}

/// Build the payment URI for `address`, see [PaymentUri].
pub fn eip681_uri(address: &str, amount_wei: U256, chain_id: u64) -> String {
    PaymentUri {
        address: address.to_owned(),
        amount_wei,
        chain_id,
    }
    .to_string()
}

/// Convert a decimal amount to an integer number of units with `decimals`
/// fractional digits.
///
/// Fractional digits beyond `decimals` are cut off, not rounded. An empty
/// integer part counts as zero, so `".5"` is accepted.
///
/// ```rust
/// # use crypax_qr::uri::{parse_units, U256};
/// assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
/// assert_eq!(parse_units("0.0000001", 6).unwrap(), U256::ZERO);
/// ```
pub fn parse_units(amount: &str, decimals: usize) -> Result<U256, AmountError> {
    let (whole, frac) = match amount.split_once('.') {
        Some((_, rest)) if rest.contains('.') => {
            return Err(AmountError::MultipleDecimalPoints(amount.to_owned()))
        }
        Some((whole, frac)) => (whole, frac),
        None => (amount, ""),
    };
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !is_digits(frac) {
        return Err(AmountError::InvalidDigits(amount.to_owned()));
    }
    let overflow = || AmountError::Overflow {
        amount: amount.to_owned(),
        decimals,
    };

    let ten = U256::from(10u64);
    let pow10 = |exp: usize| {
        let exp = u64::try_from(exp).ok()?;
        ten.checked_pow(U256::from(exp))
    };
    let scale = pow10(decimals).ok_or_else(overflow)?;
    let frac = &frac[..frac.len().min(decimals)];
    let frac_scale = pow10(decimals - frac.len()).ok_or_else(overflow)?;

    let whole = parse_digits(whole).ok_or_else(overflow)?;
    let frac = parse_digits(frac).ok_or_else(overflow)?;
    whole
        .checked_mul(scale)
        .and_then(|w| frac.checked_mul(frac_scale).and_then(|f| w.checked_add(f)))
        .ok_or_else(overflow)
}

// Digits are already validated, only overflow can fail.
fn parse_digits(digits: &str) -> Option<U256> {
    if digits.is_empty() {
        return Some(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).ok()
}

/// [parse_units] as decimal string, for example `"1.5"` with 6 decimals
/// gives `"1500000"`.
pub fn to_wei_string(amount: &str, decimals: usize) -> Result<String, AmountError> {
    parse_units(amount, decimals).map(|value| value.to_string())
}

/// [parse_units] with [DEFAULT_DECIMALS].
pub fn to_wei(amount: &str) -> Result<U256, AmountError> {
    parse_units(amount, DEFAULT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{eip681_uri, parse_units, to_wei, to_wei_string, AmountError, U256};

    #[test]
    fn uri_format() {
        assert_eq!(
            eip681_uri("0xabc", U256::from(1000u64), 1),
            "ethereum:0xabc?value=1000&chainId=1"
        );
    }

    #[test]
    fn wei_whole_and_fraction() {
        assert_eq!(to_wei_string("1", 18).unwrap(), "1000000000000000000");
        assert_eq!(to_wei_string("1.5", 18).unwrap(), "1500000000000000000");
        assert_eq!(to_wei("0.000000000000000001").unwrap(), U256::from(1u64));
        assert_eq!(
            to_wei_string("123456789.123456789", 18).unwrap(),
            "123456789123456789000000000"
        );
    }

    #[test]
    fn wei_empty_parts() {
        assert_eq!(to_wei_string(".5", 2).unwrap(), "50");
        assert_eq!(to_wei_string("5.", 2).unwrap(), "500");
        assert_eq!(to_wei_string("", 2).unwrap(), "0");
        assert_eq!(to_wei_string("0", 18).unwrap(), "0");
        assert_eq!(to_wei_string("007.10", 2).unwrap(), "710");
    }

    #[test]
    fn wei_truncates_fraction() {
        assert_eq!(to_wei_string("1.999", 2).unwrap(), "199");
        assert_eq!(to_wei_string("0.001", 2).unwrap(), "0");
        assert_eq!(to_wei_string("12.34", 0).unwrap(), "12");
    }

    #[test]
    fn wei_rejects_garbage() {
        assert_eq!(
            to_wei("-1"),
            Err(AmountError::InvalidDigits("-1".to_owned()))
        );
        assert_eq!(
            to_wei("1e18"),
            Err(AmountError::InvalidDigits("1e18".to_owned()))
        );
        assert_eq!(
            to_wei(" 1"),
            Err(AmountError::InvalidDigits(" 1".to_owned()))
        );
        assert_eq!(
            to_wei("1.2.3"),
            Err(AmountError::MultipleDecimalPoints("1.2.3".to_owned()))
        );
    }

    #[test]
    fn huge_decimals_overflow() {
        let overflow = |decimals| AmountError::Overflow {
            amount: "1".to_owned(),
            decimals,
        };
        assert_eq!(parse_units("1", usize::MAX), Err(overflow(usize::MAX)));
        assert_eq!(parse_units("1", 1 << 40), Err(overflow(1 << 40)));
        assert_eq!(parse_units("1", 78), Err(overflow(78)));
        // 10^77 is the largest power of ten below 2^256
        assert_eq!(
            parse_units("1", 77).unwrap(),
            U256::from(10u64).pow(U256::from(77u64))
        );
        // zero still needs the scale to exist
        assert!(parse_units("0", 78).is_err());
    }

    #[test]
    fn large_amount_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_units(&max, 0).unwrap(), U256::MAX);
        assert!(matches!(
            parse_units(&max, 1),
            Err(AmountError::Overflow { decimals: 1, .. })
        ));
        let too_long = "9".repeat(100);
        assert!(matches!(
            parse_units(&too_long, 0),
            Err(AmountError::Overflow { .. })
        ));
        // a fraction longer than the decimals is cut off before parsing
        let long_fraction = format!("1.{}", "9".repeat(200));
        assert_eq!(parse_units(&long_fraction, 2).unwrap(), U256::from(199u64));
    }
}
