//! Wire-level transaction types for the ICON JSON-RPC v3 API.

use serde::Serialize;
use serde_json::Value;

use super::address::{Address, AddressError};
use super::params::CallParams;
use super::serializer::{SerializationError, TransactionSerializer};
use super::signatures::{Signature, SignatureError};

/// Protocol version sent with every transaction.
pub const TX_VERSION: &str = "0x3";

/// `{method, params}` object used both in `icx_call` and in call transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallData {
    pub method: String,
    pub params: CallParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployData {
    pub content_type: String,
    /// `0x`-prefixed hex of the deployable archive.
    pub content: String,
    #[serde(skip_serializing_if = "CallParams::is_empty")]
    pub params: CallParams,
}

/// Payload of the `data` field; the variant determines `dataType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransactionData {
    Call(CallData),
    Deploy(DeployData),
    /// `0x`-prefixed hex of an arbitrary message.
    Message(String),
}

impl TransactionData {
    pub fn data_type(&self) -> &'static str {
        match self {
            TransactionData::Call(_) => "call",
            TransactionData::Deploy(_) => "deploy",
            TransactionData::Message(_) => "message",
        }
    }
}

/// Parameters of `icx_sendTransaction`, minus the signature.
///
/// Built by [`crate::chain::transaction_builder`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParam {
    pub(crate) version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) from: Option<Address>,
    pub(crate) to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) value: Option<String>,
    pub(crate) step_limit: String,
    pub(crate) timestamp: String,
    pub(crate) nid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) nonce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<TransactionData>,
}

impl TransactionParam {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn step_limit(&self) -> &str {
        &self.step_limit
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn nid(&self) -> &str {
        &self.nid
    }

    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    pub fn data_type(&self) -> Option<&str> {
        self.data_type.as_deref()
    }

    pub fn data(&self) -> Option<&TransactionData> {
        self.data.as_ref()
    }

    /// Copy of these parameters with the sender filled in.
    pub(crate) fn with_sender(&self, from: Address) -> Self {
        Self {
            from: Some(from),
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Result<Value, SerializationError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The canonical string that is hashed for signing.
    pub fn serialize_for_signing(&self) -> Result<String, SerializationError> {
        TransactionSerializer::serialize(&self.to_json()?)
    }

    /// SHA3-256 transaction hash.
    pub fn hash(&self) -> Result<[u8; 32], SerializationError> {
        TransactionSerializer::hash(&self.to_json()?)
    }
}

/// Parameters of a read-only `icx_call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<Address>,
    to: Address,
    data_type: &'static str,
    data: CallData,
}

impl CallPayload {
    /// `contract` must be a `cx` address.
    pub fn new(contract: &str, method: &str, params: CallParams) -> Result<Self, AddressError> {
        Ok(Self {
            from: None,
            to: Address::contract(contract)?,
            data_type: "call",
            data: CallData {
                method: method.to_string(),
                params,
            },
        })
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn contract(&self) -> &Address {
        &self.to
    }

    pub fn method(&self) -> &str {
        &self.data.method
    }

    pub fn params(&self) -> &CallParams {
        &self.data.params
    }
}

/// Transaction parameters plus their signature, ready for `icx_sendTransaction`.
///
/// Only constructed after the signature has been checked against `params.from`.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    params: TransactionParam,
    signature: Signature,
    tx_hash: [u8; 32],
}

#[derive(Serialize)]
struct SignedWire<'a> {
    #[serde(flatten)]
    params: &'a TransactionParam,
    signature: String,
}

impl SignedTransaction {
    pub(crate) fn new(
        params: TransactionParam,
        signature: Signature,
        tx_hash: [u8; 32],
    ) -> Result<Self, SignatureError> {
        let signed = Self { params, signature, tx_hash };
        signed.verify()?;
        Ok(signed)
    }

    pub fn params(&self) -> &TransactionParam {
        &self.params
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signature_base64(&self) -> String {
        self.signature.to_base64()
    }

    pub fn tx_hash(&self) -> &[u8; 32] {
        &self.tx_hash
    }

    pub fn tx_hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.tx_hash))
    }

    /// Recovers the signer and checks it is the declared sender.
    pub fn verify(&self) -> Result<Address, SignatureError> {
        let recovered = self.signature.recover_address(&self.tx_hash)?;
        match &self.params.from {
            Some(expected) if expected == &recovered => Ok(recovered),
            Some(expected) => Err(SignatureError::SignerMismatch {
                expected: expected.clone(),
                recovered,
            }),
            None => Err(SignatureError::InvalidSignature),
        }
    }

    /// JSON object sent as `icx_sendTransaction` params.
    pub fn to_json(&self) -> Result<Value, SerializationError> {
        Ok(serde_json::to_value(SignedWire {
            params: &self.params,
            signature: self.signature.to_base64(),
        })?)
    }
}
