//! Typed contract-call arguments.
//!
//! SCORE methods take a JSON object of named arguments whose scalar values are all
//! strings on the wire: integers and booleans travel as hex, bytes as `0x` hex.
//! `ParamValue` keeps the variant explicit until serialization.

use std::collections::BTreeMap;

use num_bigint::{BigInt, BigUint, Sign};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::address::Address;

/// Named arguments of a contract method, kept sorted by name.
pub type CallParams = BTreeMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    String(String),
    Integer(BigInt),
    Bool(bool),
    Bytes(Vec<u8>),
    Null,
    Map(BTreeMap<String, ParamValue>),
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        ParamValue::Bytes(data.into())
    }

    /// Wire form of a scalar, or `None` for `Null` and the container variants.
    pub fn to_wire_string(&self) -> Option<String> {
        match self {
            ParamValue::String(s) => Some(s.clone()),
            ParamValue::Integer(n) => Some(int_to_hex(n)),
            ParamValue::Bool(b) => Some(if *b { "0x1" } else { "0x0" }.to_string()),
            ParamValue::Bytes(data) => Some(format!("0x{}", hex::encode(data))),
            ParamValue::Null | ParamValue::Map(_) | ParamValue::List(_) => None,
        }
    }
}

/// Signed integers use `-0x…` for negatives, unlike transaction quantities.
fn int_to_hex(n: &BigInt) -> String {
    let digits = n.magnitude().to_str_radix(16);
    match n.sign() {
        Sign::Minus => format!("-0x{}", digits),
        Sign::NoSign | Sign::Plus => format!("0x{}", digits),
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Null => serializer.serialize_none(),
            ParamValue::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ParamValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            scalar => {
                let wire = scalar.to_wire_string().unwrap_or_default();
                serializer.serialize_str(&wire)
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&Address> for ParamValue {
    fn from(value: &Address) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<Address> for ParamValue {
    fn from(value: Address) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<BigInt> for ParamValue {
    fn from(value: BigInt) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<BigUint> for ParamValue {
    fn from(value: BigUint) -> Self {
        ParamValue::Integer(BigInt::from(value))
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Integer(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl<V: Into<ParamValue>> From<Vec<V>> for ParamValue {
    fn from(values: Vec<V>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ParamValue>> for ParamValue {
    fn from(entries: BTreeMap<String, ParamValue>) -> Self {
        ParamValue::Map(entries)
    }
}
