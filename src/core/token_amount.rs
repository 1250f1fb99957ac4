use std::fmt;

use num_bigint::BigUint;
use thiserror::Error;

use super::numeric::{self, NumericError, ICX_DECIMALS};

#[derive(Error, Debug)]
pub enum TokenAmountError {
    #[error("Cannot add TokenAmounts with different decimals: {0} != {1}")]
    DecimalMismatch(u8, u8),

    #[error("Cannot add TokenAmounts with different symbols: {0:?} != {1:?}")]
    SymbolMismatch(Option<String>, Option<String>),

    #[error(transparent)]
    Numeric(#[from] NumericError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    pub raw: BigUint,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl TokenAmount {
    pub fn new(raw: BigUint, decimals: u8, symbol: Option<String>) -> Self {
        Self { raw, decimals, symbol }
    }

    pub fn native_icx(raw: impl Into<BigUint>) -> Self {
        Self::new(raw.into(), ICX_DECIMALS, Some("ICX".to_string()))
    }

    /// Decimal string (e.g. `"1.5"`) → raw units.
    pub fn from_human(amount: &str, decimals: u8, symbol: Option<String>) -> Result<Self, TokenAmountError> {
        let raw = numeric::to_base_units(amount, decimals)?;
        Ok(Self { raw, decimals, symbol })
    }

    pub fn from_human_native_icx(amount: &str) -> Result<Self, TokenAmountError> {
        Self::from_human(amount, ICX_DECIMALS, Some("ICX".to_string()))
    }

    /// Raw → decimal string (no floats).
    pub fn human(&self) -> String {
        numeric::from_base_units(&self.raw, self.decimals)
    }

    /// Wire encoding of the raw amount.
    pub fn to_hex(&self) -> String {
        numeric::to_hex(&self.raw)
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, TokenAmountError> {
        if self.decimals != other.decimals {
            return Err(TokenAmountError::DecimalMismatch(self.decimals, other.decimals));
        }
        if let (Some(a), Some(b)) = (&self.symbol, &other.symbol) {
            if a != b {
                return Err(TokenAmountError::SymbolMismatch(self.symbol.clone(), other.symbol.clone()));
            }
        }
        Ok(Self {
            raw: &self.raw + &other.raw,
            decimals: self.decimals,
            symbol: self.symbol.clone().or_else(|| other.symbol.clone()),
        })
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol_str = self.symbol.as_ref()
            .map(|s| format!(" {}", s))
            .unwrap_or_default();
        write!(f, "{}{}", self.human(), symbol_str)
    }
}
