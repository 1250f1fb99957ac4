use serde_json::{Map, Value};
use sha3::{Digest, Sha3_256};
use thiserror::Error;

/// Prefix of every serialized transaction; the signature covers it.
pub const SEND_TRANSACTION_PREFIX: &str = "icx_sendTransaction";

/// Top-level keys that are never part of the signed payload.
const EXCLUDED_KEYS: [&str; 3] = ["signature", "txHash", "tx_hash"];

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Transaction parameters must be a JSON object")]
    NotAnObject,

    #[error("Floating point numbers are not allowed in cryptographic serialization: {0}")]
    FloatingPointNotAllowed(f64),
}

/// ICON v3 canonical serialization: `icx_sendTransaction.` followed by the params with
/// keys sorted, `key.value` pairs joined by `.`, nested objects in `{}`, arrays in
/// `[]`, `null` as `\0`, and `\ . { } [ ]` backslash-escaped inside values.
pub struct TransactionSerializer;

impl TransactionSerializer {
    pub fn serialize(params: &Value) -> Result<String, SerializationError> {
        let map = params.as_object().ok_or(SerializationError::NotAnObject)?;
        let mut out = String::from(SEND_TRANSACTION_PREFIX);
        for (key, value) in Self::sorted_entries(map) {
            if EXCLUDED_KEYS.contains(&key.as_str()) {
                continue;
            }
            out.push('.');
            out.push_str(key);
            out.push('.');
            Self::encode_value(value, &mut out)?;
        }
        Ok(out)
    }

    /// SHA3-256 of the serialized form; this is the transaction hash and the
    /// digest that gets signed.
    pub fn hash(params: &Value) -> Result<[u8; 32], SerializationError> {
        let serialized = Self::serialize(params)?;
        let digest = Sha3_256::digest(serialized.as_bytes());

        let mut hash_array = [0u8; 32];
        hash_array.copy_from_slice(&digest);
        Ok(hash_array)
    }

    fn sorted_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
        let mut entries: Vec<(&String, &Value)> = map.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    fn encode_value(value: &Value, out: &mut String) -> Result<(), SerializationError> {
        match value {
            Value::Object(map) => {
                out.push('{');
                for (i, (key, inner)) in Self::sorted_entries(map).into_iter().enumerate() {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(key);
                    out.push('.');
                    Self::encode_value(inner, out)?;
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push('.');
                    }
                    Self::encode_value(item, out)?;
                }
                out.push(']');
            }
            Value::Null => out.push_str("\\0"),
            Value::Bool(b) => out.push_str(if *b { "0x1" } else { "0x0" }),
            Value::Number(n) => {
                if !n.is_i64() && !n.is_u64() {
                    let f = n.as_f64().unwrap_or(0.0);
                    return Err(SerializationError::FloatingPointNotAllowed(f));
                }
                out.push_str(&n.to_string());
            }
            Value::String(s) => Self::escape_into(s, out),
        }
        Ok(())
    }

    fn escape_into(s: &str, out: &mut String) {
        for ch in s.chars() {
            if matches!(ch, '\\' | '.' | '{' | '}' | '[' | ']') {
                out.push('\\');
            }
            out.push(ch);
        }
    }
}
