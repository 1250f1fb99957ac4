use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde_json::{Map, Value};
use thiserror::Error;

use super::address::Address;
use super::numeric;
use super::token_amount::TokenAmount;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub score_address: Address,
    /// Event signature followed by indexed arguments.
    pub indexed: Vec<Option<String>>,
    pub data: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: BigUint,
    pub message: String,
}

/// Outcome of an executed transaction as returned by `icx_getTransactionResult`.
#[derive(Debug, Clone)]
pub struct TransactionResult {
    pub tx_hash: String,
    pub block_height: u64,
    pub block_hash: Option<String>,
    pub status: bool,
    pub step_used: BigUint,
    pub step_price: BigUint,
    pub cumulative_step_used: Option<BigUint>,
    /// Set when the transaction deployed a contract.
    pub score_address: Option<Address>,
    pub event_logs: Vec<EventLog>,
    pub failure: Option<Failure>,
}

impl TransactionResult {
    /// Fee actually charged: `stepUsed * stepPrice` loop.
    pub fn fee(&self) -> TokenAmount {
        TokenAmount::native_icx(&self.step_used * &self.step_price)
    }

    /// Numeric fields may be hex strings or JSON numbers.
    pub fn from_json(result: &Value) -> Result<Self, TransactionResultError> {
        let obj = result.as_object()
            .ok_or_else(|| TransactionResultError::InvalidFormat("Result must be a JSON object".to_string()))?;

        let tx_hash = required_str(obj, "txHash")?.to_string();

        let status = match required_str(obj, "status")? {
            "0x1" => true,
            "0x0" => false,
            other => {
                return Err(TransactionResultError::InvalidFormat(
                    format!("Invalid status value: {}", other)
                ));
            }
        };

        let block_height = parse_hex_or_number(required(obj, "blockHeight")?)?;
        let block_height = block_height.to_u64()
            .ok_or_else(|| TransactionResultError::InvalidFormat("blockHeight exceeds u64".to_string()))?;

        let step_used = parse_hex_or_number(required(obj, "stepUsed")?)?;
        let step_price = parse_hex_or_number(required(obj, "stepPrice")?)?;
        let cumulative_step_used = obj.get("cumulativeStepUsed")
            .map(parse_hex_or_number)
            .transpose()?;

        let block_hash = obj.get("blockHash")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let score_address = match obj.get("scoreAddress").and_then(|v| v.as_str()) {
            Some(s) => Some(parse_address(s, "scoreAddress")?),
            None => None,
        };

        let event_logs = match obj.get("eventLogs") {
            Some(Value::Array(logs)) => logs
                .iter()
                .enumerate()
                .map(|(idx, log)| parse_event_log(idx, log))
                .collect::<Result<Vec<_>, _>>()?,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                return Err(TransactionResultError::InvalidFormat("eventLogs must be an array".to_string()));
            }
        };

        let failure = match obj.get("failure") {
            Some(Value::Object(f)) => Some(Failure {
                code: parse_hex_or_number(required(f, "code")?)?,
                message: f.get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
            }),
            _ => None,
        };

        Ok(TransactionResult {
            tx_hash,
            block_height,
            block_hash,
            status,
            step_used,
            step_price,
            cumulative_step_used,
            score_address,
            event_logs,
            failure,
        })
    }
}

fn parse_event_log(idx: usize, log: &Value) -> Result<EventLog, TransactionResultError> {
    let log_obj = log.as_object()
        .ok_or_else(|| TransactionResultError::InvalidFormat(
            format!("Event log at index {} must be a JSON object", idx)
        ))?;
    let score_address = parse_address(required_str(log_obj, "scoreAddress")?, "scoreAddress")?;
    Ok(EventLog {
        score_address,
        indexed: string_items(log_obj.get("indexed"), idx, "indexed")?,
        data: string_items(log_obj.get("data"), idx, "data")?,
    })
}

fn string_items(
    value: Option<&Value>,
    idx: usize,
    field: &str,
) -> Result<Vec<Option<String>>, TransactionResultError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(Some(s.clone())),
                Value::Null => Ok(None),
                _ => Err(TransactionResultError::InvalidFormat(
                    format!("Event log {} field '{}' must hold strings", idx, field)
                )),
            })
            .collect(),
        Some(_) => Err(TransactionResultError::InvalidFormat(
            format!("Event log {} field '{}' must be an array", idx, field)
        )),
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, TransactionResultError> {
    obj.get(field)
        .ok_or_else(|| TransactionResultError::MissingField(field.to_string()))
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str, TransactionResultError> {
    required(obj, field)?
        .as_str()
        .ok_or_else(|| TransactionResultError::InvalidFormat(format!("{} must be a string", field)))
}

fn parse_address(s: &str, field: &str) -> Result<Address, TransactionResultError> {
    Address::from_string(s)
        .map_err(|e| TransactionResultError::InvalidFormat(format!("Invalid {}: {}", field, e)))
}

fn parse_hex_or_number(value: &Value) -> Result<BigUint, TransactionResultError> {
    match value {
        Value::String(s) => numeric::from_hex(s)
            .map_err(|e| TransactionResultError::InvalidFormat(e.to_string())),
        Value::Number(n) => n.as_u64()
            .map(BigUint::from)
            .ok_or_else(|| TransactionResultError::InvalidFormat(
                format!("Number too large or negative: {}", n)
            )),
        _ => Err(TransactionResultError::InvalidFormat(
            "Value must be a hex string or number".to_string()
        )),
    }
}

#[derive(Error, Debug)]
pub enum TransactionResultError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
