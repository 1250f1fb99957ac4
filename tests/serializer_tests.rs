use icon_sdk::chain::network::NetworkProfile;
use icon_sdk::chain::transaction_builder::TransactionBuilder;
use icon_sdk::core::params::{CallParams, ParamValue};
use icon_sdk::core::serializer::{SerializationError, TransactionSerializer};
use num_bigint::{BigInt, BigUint};
use serde_json::json;

const FROM: &str = "hxbe258ceb872e08851f1f59694dac2558708ece11";
const TO: &str = "hx5bfdb090f43a808005ffc27c25b213145e80b7cd";
const CONTRACT: &str = "cx26a32e36df0a408a573163d05b3043c180359735";
const TIMESTAMP: u64 = 0x563a6cf330136;

const TRANSFER_SERIALIZED: &str = "icx_sendTransaction.from.hxbe258ceb872e08851f1f59694dac2558708ece11.nid.0x3.nonce.0x1.stepLimit.0x12345.timestamp.0x563a6cf330136.to.hx5bfdb090f43a808005ffc27c25b213145e80b7cd.value.0xde0b6b3a7640000.version.0x3";

fn transfer_builder() -> TransactionBuilder {
    TransactionBuilder::new()
        .from(FROM)
        .to(TO)
        .value(BigUint::from(1_000_000_000_000_000_000u64))
        .step_limit(0x12345u64)
        .timestamp(TIMESTAMP)
        .network(NetworkProfile::localhost())
}

#[test]
fn test_serialize_transfer() {
    let tx = transfer_builder().build().unwrap();
    assert_eq!(tx.serialize_for_signing().unwrap(), TRANSFER_SERIALIZED);
}

#[test]
fn test_serialize_raw_json_matches_builder() {
    let params = json!({
        "version": "0x3",
        "from": FROM,
        "to": TO,
        "value": "0xde0b6b3a7640000",
        "stepLimit": "0x12345",
        "timestamp": "0x563a6cf330136",
        "nid": "0x3",
        "nonce": "0x1",
    });
    assert_eq!(TransactionSerializer::serialize(&params).unwrap(), TRANSFER_SERIALIZED);
}

#[test]
fn test_transfer_hash_is_sha3_256_of_serialization() {
    let tx = transfer_builder().build().unwrap();
    assert_eq!(
        hex::encode(tx.hash().unwrap()),
        "2a1551bda6e047f124dd038cf4cf0fbab215e753526618ad798bb09f5079f05c"
    );
}

#[test]
fn test_signature_and_hash_fields_are_excluded() {
    let mut params = serde_json::to_value(transfer_builder().build().unwrap()).unwrap();
    params["signature"] = json!("c2lnbmF0dXJl");
    params["txHash"] = json!("0x00");
    assert_eq!(TransactionSerializer::serialize(&params).unwrap(), TRANSFER_SERIALIZED);
}

#[test]
fn test_serialize_call_data() {
    let mut call_params = CallParams::new();
    call_params.insert("_value".to_string(), ParamValue::from(1u8));
    call_params.insert("_to".to_string(), ParamValue::from(TO));

    let tx = TransactionBuilder::new()
        .from(FROM)
        .to(CONTRACT)
        .step_limit(0x12345u64)
        .timestamp(TIMESTAMP)
        .network(NetworkProfile::localhost())
        .call("transfer", call_params)
        .build()
        .unwrap();

    let expected = format!(
        "icx_sendTransaction.data.{{method.transfer.params.{{_to.{}._value.0x1}}}}.dataType.call.from.{}.nid.0x3.nonce.0x1.stepLimit.0x12345.timestamp.0x563a6cf330136.to.{}.version.0x3",
        TO, FROM, CONTRACT
    );
    assert_eq!(tx.serialize_for_signing().unwrap(), expected);
}

#[test]
fn test_serialize_empty_params_as_braces() {
    let tx = TransactionBuilder::new()
        .from(FROM)
        .to(CONTRACT)
        .timestamp(TIMESTAMP)
        .network(NetworkProfile::localhost())
        .call("name", CallParams::new())
        .build()
        .unwrap();
    assert!(tx
        .serialize_for_signing()
        .unwrap()
        .starts_with("icx_sendTransaction.data.{method.name.params.{}}.dataType.call."));
}

#[test]
fn test_escaping_of_special_characters() {
    let params = json!({ "data": "a.b{c}[d]\\e" });
    assert_eq!(
        TransactionSerializer::serialize(&params).unwrap(),
        "icx_sendTransaction.data.a\\.b\\{c\\}\\[d\\]\\\\e"
    );
}

#[test]
fn test_nested_arrays_and_nulls() {
    let params = json!({
        "data": { "params": { "list": ["0x1", null, { "k": "v" }] } },
    });
    assert_eq!(
        TransactionSerializer::serialize(&params).unwrap(),
        "icx_sendTransaction.data.{params.{list.[0x1.\\0.{k.v}]}}"
    );
}

#[test]
fn test_param_values_encode_as_hex_strings() {
    let mut call_params = CallParams::new();
    call_params.insert("flag".to_string(), ParamValue::from(true));
    call_params.insert("neg".to_string(), ParamValue::from(BigInt::from(-255)));
    call_params.insert("raw".to_string(), ParamValue::bytes(vec![0xde, 0xad]));
    call_params.insert("none".to_string(), ParamValue::Null);

    let value = serde_json::to_value(&call_params).unwrap();
    assert_eq!(
        value,
        json!({ "flag": "0x1", "neg": "-0xff", "raw": "0xdead", "none": null })
    );
    assert_eq!(
        TransactionSerializer::serialize(&json!({ "params": value })).unwrap(),
        "icx_sendTransaction.params.{flag.0x1.neg.-0xff.none.\\0.raw.0xdead}"
    );
}

#[test]
fn test_message_data_is_hex_encoded() {
    let tx = TransactionBuilder::new()
        .from(FROM)
        .to(TO)
        .timestamp(TIMESTAMP)
        .network(NetworkProfile::localhost())
        .message("hi")
        .build()
        .unwrap();
    assert_eq!(tx.data_type(), Some("message"));
    assert!(tx
        .serialize_for_signing()
        .unwrap()
        .starts_with("icx_sendTransaction.data.0x6869.dataType.message."));
}

#[test]
fn test_rejects_non_object() {
    let result = TransactionSerializer::serialize(&json!(["not", "an", "object"]));
    assert!(matches!(result, Err(SerializationError::NotAnObject)));
}

#[test]
fn test_rejects_floats() {
    let result = TransactionSerializer::serialize(&json!({ "value": 1.5 }));
    assert!(matches!(result, Err(SerializationError::FloatingPointNotAllowed(_))));
}
