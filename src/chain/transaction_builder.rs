//! Assembles unsigned `icx_sendTransaction` parameters.
//!
//! Builders perform no I/O and never sign. The network id comes from an explicit
//! profile when one is given, otherwise from the active network.

use std::time::{SystemTime, UNIX_EPOCH};

use num_bigint::BigUint;
use thiserror::Error;

use crate::chain::network::{self, NetworkError, NetworkProfile};
use crate::core::address::{Address, AddressError};
use crate::core::numeric::{self, NumericError};
use crate::core::params::CallParams;
use crate::core::transaction::{CallData, DeployData, TransactionData, TransactionParam, TX_VERSION};

/// Step limit used when none is set (`0xf4240`).
pub const DEFAULT_STEP_LIMIT: u64 = 1_000_000;

/// Nonce used when none is set.
pub const DEFAULT_NONCE: u64 = 1;

#[derive(Error, Debug)]
pub enum TransactionBuilderError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] NumericError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    from: Option<String>,
    to: Option<String>,
    value: Option<BigUint>,
    step_limit: Option<BigUint>,
    nonce: Option<BigUint>,
    timestamp: Option<u64>,
    network: Option<NetworkProfile>,
    data: Option<TransactionData>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender; must be an `hx` account address.
    pub fn from(mut self, address: &str) -> Self {
        self.from = Some(address.to_string());
        self
    }

    pub fn to(mut self, address: &str) -> Self {
        self.to = Some(address.to_string());
        self
    }

    /// Amount in loop.
    pub fn value(mut self, amount: BigUint) -> Self {
        self.value = Some(amount);
        self
    }

    pub fn step_limit(mut self, limit: impl Into<BigUint>) -> Self {
        self.step_limit = Some(limit.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<BigUint>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Timestamp in microseconds since the Unix epoch.
    pub fn timestamp(mut self, micros: u64) -> Self {
        self.timestamp = Some(micros);
        self
    }

    /// Uses `profile` instead of the active network.
    pub fn network(mut self, profile: NetworkProfile) -> Self {
        self.network = Some(profile);
        self
    }

    pub fn call(mut self, method: &str, params: CallParams) -> Self {
        self.data = Some(TransactionData::Call(CallData {
            method: method.to_string(),
            params,
        }));
        self
    }

    /// Attaches an arbitrary message, hex encoded on the wire.
    pub fn message(mut self, message: impl AsRef<[u8]>) -> Self {
        self.data = Some(TransactionData::Message(format!("0x{}", hex::encode(message))));
        self
    }

    pub fn deploy(mut self, content_type: &str, content: &[u8], params: CallParams) -> Self {
        self.data = Some(TransactionData::Deploy(DeployData {
            content_type: content_type.to_string(),
            content: format!("0x{}", hex::encode(content)),
            params,
        }));
        self
    }

    pub fn build(self) -> Result<TransactionParam, TransactionBuilderError> {
        let from = self.from.as_deref().map(Address::account).transpose()?;
        let to_raw = self
            .to
            .as_deref()
            .ok_or_else(|| TransactionBuilderError::MissingField("to".into()))?;
        let to = match &self.data {
            Some(TransactionData::Call(_)) | Some(TransactionData::Deploy(_)) => Address::contract(to_raw)?,
            _ => Address::from_string(to_raw)?,
        };

        let profile = match self.network {
            Some(profile) => profile,
            None => network::active_network()?,
        };

        let step_limit = self
            .step_limit
            .unwrap_or_else(|| BigUint::from(DEFAULT_STEP_LIMIT));
        let nonce = self.nonce.unwrap_or_else(|| BigUint::from(DEFAULT_NONCE));
        let timestamp = self.timestamp.unwrap_or_else(current_micros);

        Ok(TransactionParam {
            version: TX_VERSION.to_string(),
            from,
            to,
            value: self.value.as_ref().map(numeric::to_hex),
            step_limit: numeric::to_hex(&step_limit),
            timestamp: numeric::u64_to_hex(timestamp),
            nid: profile.nid_hex(),
            nonce: Some(numeric::to_hex(&nonce)),
            data_type: self.data.as_ref().map(|d| d.data_type().to_string()),
            data: self.data,
        })
    }
}

/// ICX transfer of `amount` loop from `from` to `to`.
///
/// # Examples
/// ```
/// # use icon_sdk::chain::network::NetworkProfile;
/// # use icon_sdk::chain::transaction_builder::TransactionBuilder;
/// # use num_bigint::BigUint;
/// let tx = TransactionBuilder::new()
///     .from("hx9c13cd371aed69c79870b3a3f7492c10122f0315")
///     .to("hx9c13cd371aed69c79870b3a3f7492c10122f0315")
///     .value(BigUint::from(100_000_000_000_000_000u64))
///     .network(NetworkProfile::berlin())
///     .build()?;
/// assert_eq!(tx.value(), Some("0x16345785d8a0000"));
/// assert_eq!(tx.nid(), "0x7");
/// # Ok::<(), icon_sdk::chain::transaction_builder::TransactionBuilderError>(())
/// ```
pub fn build_transfer(
    from: &str,
    to: &str,
    amount: &BigUint,
) -> Result<TransactionParam, TransactionBuilderError> {
    TransactionBuilder::new()
        .from(from)
        .to(to)
        .value(amount.clone())
        .build()
}

/// Contract call without a sender; the signing wallet supplies it.
pub fn build_call(
    contract: &str,
    method: &str,
    params: CallParams,
) -> Result<TransactionParam, TransactionBuilderError> {
    TransactionBuilder::new().to(contract).call(method, params).build()
}

fn current_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or_default()
}
