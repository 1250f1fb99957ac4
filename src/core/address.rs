use std::fmt;
use std::str::FromStr;

use k256::ecdsa::VerifyingKey;
use serde::{Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use thiserror::Error;

const BODY_LEN: usize = 40;

/// Which kind of account an address points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// `hx…` externally owned account.
    Account,
    /// `cx…` smart contract (SCORE).
    Contract,
}

impl AddressKind {
    pub fn prefix(self) -> &'static str {
        match self {
            AddressKind::Account => "hx",
            AddressKind::Contract => "cx",
        }
    }
}

/// A validated ICON address: `hx` or `cx` followed by 40 hex characters, stored lowercase.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address {
    value: String,
    kind: AddressKind,
}

impl Address {
    /// Validates and normalizes an address string.
    ///
    /// # Examples
    /// ```
    /// # use icon_sdk::core::address::{Address, AddressKind};
    /// let addr = Address::from_string("hx9c13cd371aed69c79870b3a3f7492c10122f0315")?;
    /// assert_eq!(addr.kind(), AddressKind::Account);
    /// # Ok::<(), icon_sdk::core::address::AddressError>(())
    /// ```
    pub fn from_string(s: &str) -> Result<Self, AddressError> {
        let kind = Self::validate_format(s)?;
        Ok(Address {
            value: s.to_ascii_lowercase(),
            kind,
        })
    }

    fn validate_format(addr_str: &str) -> Result<AddressKind, AddressError> {
        let kind = if addr_str.starts_with("hx") {
            AddressKind::Account
        } else if addr_str.starts_with("cx") {
            AddressKind::Contract
        } else {
            return Err(AddressError::InvalidPrefix(addr_str.to_string()));
        };
        if addr_str.len() != BODY_LEN + 2 {
            return Err(AddressError::InvalidLength(addr_str.len(), addr_str.to_string()));
        }
        if !addr_str[2..].chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidHexCharacters(addr_str.to_string()));
        }
        Ok(kind)
    }

    /// Parses an address that must be an externally owned account.
    pub fn account(s: &str) -> Result<Self, AddressError> {
        let addr = Self::from_string(s)?;
        match addr.kind {
            AddressKind::Account => Ok(addr),
            AddressKind::Contract => Err(AddressError::NotAnAccount(addr.value)),
        }
    }

    /// Parses an address that must be a contract.
    pub fn contract(s: &str) -> Result<Self, AddressError> {
        let addr = Self::from_string(s)?;
        match addr.kind {
            AddressKind::Contract => Ok(addr),
            AddressKind::Account => Err(AddressError::NotAContract(addr.value)),
        }
    }

    /// `hx` + last 20 bytes of SHA3-256 over the uncompressed public key (tag byte dropped).
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        let encoded = public_key.to_encoded_point(false);
        let hash = Sha3_256::digest(&encoded.as_bytes()[1..]);
        Address {
            value: format!("hx{}", hex::encode(&hash[12..])),
            kind: AddressKind::Account,
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AddressKind::Contract
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(\"{}\")", self.value)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address must start with 'hx' or 'cx', got: {0}")]
    InvalidPrefix(String),

    #[error("Address must be 42 characters (prefix + 40 hex chars), got {0} characters: {1}")]
    InvalidLength(usize, String),

    #[error("Address contains invalid hex characters: {0}")]
    InvalidHexCharacters(String),

    #[error("Expected an account (hx) address, got contract: {0}")]
    NotAnAccount(String),

    #[error("Expected a contract (cx) address, got: {0}")]
    NotAContract(String),
}
