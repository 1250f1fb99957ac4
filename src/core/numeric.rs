//! Conversions between human amounts, big integers and the `0x` hex strings
//! used for every numeric field on the ICON v3 wire.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Num, Zero};
use thiserror::Error;

/// Decimals of the native ICX token (1 ICX = 10^18 loop).
pub const ICX_DECIMALS: u8 = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Malformed hex string: {0}")]
    MalformedHex(String),
}

/// Decimal string (e.g. `"0.1"`) → base units, truncating digits beyond `decimals`.
///
/// # Examples
/// ```
/// # use icon_sdk::core::numeric::to_base_units;
/// let loop_amount = to_base_units("0.1", 18)?;
/// assert_eq!(loop_amount.to_string(), "100000000000000000");
/// # Ok::<(), icon_sdk::core::numeric::NumericError>(())
/// ```
pub fn to_base_units(amount: &str, decimals: u8) -> Result<BigUint, NumericError> {
    if amount.starts_with('-') {
        return Err(NumericError::InvalidAmount(format!("negative amount: {}", amount)));
    }
    let (integer_part, fractional_part) = match amount.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (amount, ""),
    };
    if integer_part.is_empty() && fractional_part.is_empty() {
        return Err(NumericError::InvalidAmount(format!("no digits in '{}'", amount)));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(integer_part) || !all_digits(fractional_part) {
        return Err(NumericError::InvalidAmount(format!("not a decimal number: '{}'", amount)));
    }

    let width = decimals as usize;
    let kept: String = fractional_part.chars().take(width).collect();
    let digits = format!("{}{:0<width$}", integer_part, kept, width = width);
    if digits.is_empty() {
        return Ok(BigUint::zero());
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| NumericError::InvalidAmount(format!("not a decimal number: '{}'", amount)))
}

/// Float variant of [`to_base_units`]; the float is rendered with its shortest
/// round-trip representation first, so `0.1` scales to exactly 10^17 at 18 decimals.
pub fn f64_to_base_units(amount: f64, decimals: u8) -> Result<BigUint, NumericError> {
    if !amount.is_finite() {
        return Err(NumericError::InvalidAmount(format!("non-finite amount: {}", amount)));
    }
    if amount.is_sign_negative() && amount != 0.0 {
        return Err(NumericError::InvalidAmount(format!("negative amount: {}", amount)));
    }
    to_base_units(&format!("{}", amount.abs()), decimals)
}

/// ICX → loop.
pub fn icx_to_loop(amount: &str) -> Result<BigUint, NumericError> {
    to_base_units(amount, ICX_DECIMALS)
}

/// Base units → decimal string with trailing zeros trimmed (no floats involved).
pub fn from_base_units(raw: &BigUint, decimals: u8) -> String {
    let divisor = BigUint::from(10u32).pow(decimals as u32);
    let integer_part = raw / &divisor;
    let fractional_part = raw % &divisor;
    if fractional_part.is_zero() {
        return integer_part.to_string();
    }
    let fractional_str = format!("{:0>width$}", fractional_part.to_string(), width = decimals as usize);
    format!("{}.{}", integer_part, fractional_str.trim_end_matches('0'))
}

/// loop → ICX.
pub fn loop_to_icx(raw: &BigUint) -> String {
    from_base_units(raw, ICX_DECIMALS)
}

/// `0x` + lowercase hex without leading zeros; zero encodes as `0x0`.
///
/// # Examples
/// ```
/// # use icon_sdk::core::numeric::to_hex;
/// # use num_bigint::BigUint;
/// assert_eq!(to_hex(&BigUint::from(100_000_000_000_000_000u64)), "0x16345785d8a0000");
/// assert_eq!(to_hex(&BigUint::from(0u8)), "0x0");
/// ```
pub fn to_hex(n: &BigUint) -> String {
    format!("0x{}", n.to_str_radix(16))
}

pub fn u64_to_hex(n: u64) -> String {
    format!("0x{:x}", n)
}

/// Signed entry point for callers holding a `BigInt`; the wire format has no
/// negative amounts, so anything below zero is rejected.
pub fn signed_to_hex(n: &BigInt) -> Result<String, NumericError> {
    match n.to_biguint() {
        Some(unsigned) => Ok(to_hex(&unsigned)),
        None => Err(NumericError::InvalidAmount(format!("negative value: {}", n))),
    }
}

/// Parses a `0x`-prefixed hex quantity. Upper-case digits are accepted.
pub fn from_hex(s: &str) -> Result<BigUint, NumericError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| NumericError::MalformedHex(format!("missing '0x' prefix: '{}'", s)))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(NumericError::MalformedHex(format!("invalid hex digits: '{}'", s)));
    }
    BigUint::from_str_radix(digits, 16)
        .map_err(|e| NumericError::MalformedHex(format!("'{}': {}", s, e)))
}

/// Like [`from_hex`] but also accepts the `-0x…` form contracts use for negative ints.
pub fn from_hex_signed(s: &str) -> Result<BigInt, NumericError> {
    match s.strip_prefix('-') {
        Some(rest) => Ok(BigInt::from_biguint(Sign::Minus, from_hex(rest)?)),
        None => Ok(BigInt::from(from_hex(s)?)),
    }
}

/// Canonical form of a well-formed hex quantity (`0x000A` → `0xa`).
pub fn normalize_hex(s: &str) -> Result<String, NumericError> {
    from_hex(s).map(|n| to_hex(&n))
}
