use num_bigint::BigUint;
use serde_json::Value;

use crate::chain::errors::ChainClientError;
use crate::core::numeric;

pub fn parse_tx_hash(tx_hash: &str) -> Result<[u8; 32], ChainClientError> {
    let hex_part = tx_hash.strip_prefix("0x").ok_or_else(|| {
        ChainClientError::InvalidResponse(format!("Transaction hash must start with '0x': {}", tx_hash))
    })?;
    if hex_part.len() != 64 {
        return Err(ChainClientError::InvalidResponse(format!(
            "Transaction hash must be 64 hex characters (32 bytes): got {} characters",
            hex_part.len()
        )));
    }
    let bytes = hex::decode(hex_part).map_err(|e| {
        ChainClientError::InvalidResponse(format!("Invalid transaction hash hex '{}': {}", tx_hash, e))
    })?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}

/// `result` field that must be a `0x` hex quantity.
pub fn parse_hex_quantity(result: &Value) -> Result<BigUint, ChainClientError> {
    let s = result.as_str().ok_or_else(|| {
        ChainClientError::InvalidResponse(format!("Expected a hex string, got {}", result))
    })?;
    numeric::from_hex(s).map_err(|e| ChainClientError::InvalidResponse(e.to_string()))
}
