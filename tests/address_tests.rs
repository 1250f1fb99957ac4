use std::collections::HashSet;

use icon_sdk::core::address::{Address, AddressError, AddressKind};
use icon_sdk::core::wallet::Wallet;

const ACCOUNT: &str = "hx9c13cd371aed69c79870b3a3f7492c10122f0315";
const CONTRACT: &str = "cx26a32e36df0a408a573163d05b3043c180359735";

#[test]
fn test_from_string_account() {
    let addr = Address::from_string(ACCOUNT).unwrap();
    assert_eq!(addr.kind(), AddressKind::Account);
    assert!(!addr.is_contract());
    assert_eq!(addr.as_str(), ACCOUNT);
}

#[test]
fn test_from_string_contract() {
    let addr = Address::from_string(CONTRACT).unwrap();
    assert_eq!(addr.kind(), AddressKind::Contract);
    assert!(addr.is_contract());
}

#[test]
fn test_from_string_lowercases() {
    let addr = Address::from_string("hx9C13CD371AED69C79870B3A3F7492C10122F0315").unwrap();
    assert_eq!(addr.as_str(), ACCOUNT);
    assert_eq!(addr, Address::from_string(ACCOUNT).unwrap());
}

#[test]
fn test_invalid_prefix() {
    let result = Address::from_string("0x9c13cd371aed69c79870b3a3f7492c10122f0315");
    assert!(matches!(result, Err(AddressError::InvalidPrefix(_))));
}

#[test]
fn test_invalid_length() {
    let result = Address::from_string("hx9c13cd371aed69c79870b3a3f7492c10122f03");
    assert!(matches!(result, Err(AddressError::InvalidLength(40, _))));
}

#[test]
fn test_invalid_hex_characters() {
    let result = Address::from_string("hx9c13cd371aed69c79870b3a3f7492c10122f031z");
    assert!(matches!(result, Err(AddressError::InvalidHexCharacters(_))));
}

#[test]
fn test_account_and_contract_constructors_check_kind() {
    assert!(Address::account(ACCOUNT).is_ok());
    assert!(matches!(Address::account(CONTRACT), Err(AddressError::NotAnAccount(_))));
    assert!(Address::contract(CONTRACT).is_ok());
    assert!(matches!(Address::contract(ACCOUNT), Err(AddressError::NotAContract(_))));
}

#[test]
fn test_from_str_and_display() {
    let addr: Address = CONTRACT.parse().unwrap();
    assert_eq!(addr.to_string(), CONTRACT);
    assert_eq!(format!("{:?}", addr), format!("Address(\"{}\")", CONTRACT));
}

#[test]
fn test_serializes_as_plain_string() {
    let addr = Address::from_string(ACCOUNT).unwrap();
    assert_eq!(serde_json::to_value(&addr).unwrap(), serde_json::json!(ACCOUNT));
}

#[test]
fn test_address_derivation_from_public_key() {
    let wallet = Wallet::from_private_key_hex(
        "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
    )
    .unwrap();
    let derived = Address::from_public_key(&wallet.public_key());

    assert_eq!(&derived, wallet.address());
    assert_eq!(derived.kind(), AddressKind::Account);
    assert_eq!(derived.as_str().len(), 42);
    assert!(derived.as_str().starts_with("hx"));
    assert!(derived.as_str()[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_address_derivation_known_vectors() {
    let cases = [
        (
            "0000000000000000000000000000000000000000000000000000000000000001",
            "hx0502987e630ea7ebb2bf1d84a65a727109385bcf",
        ),
        (
            "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
            "hx07fda9b71488d5b48baf1763c8ef206cdb2567d5",
        ),
    ];
    for (key, expected) in cases {
        let wallet = Wallet::from_private_key_hex(key).unwrap();
        assert_eq!(wallet.address().as_str(), expected);
    }
}

#[test]
fn test_address_derivation_is_deterministic() {
    let key = "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890";
    let a = Wallet::from_private_key_hex(key).unwrap();
    let b = Wallet::from_private_key_hex(&format!("0x{}", key)).unwrap();
    assert_eq!(a.address(), b.address());
}

#[test]
fn test_addresses_as_set_keys() {
    let mut seen = HashSet::new();
    assert!(seen.insert(Address::from_string(ACCOUNT).unwrap()));
    assert!(!seen.insert(Address::from_string(&ACCOUNT.to_uppercase().replacen("HX", "hx", 1)).unwrap()));
    assert!(seen.insert(Address::from_string(CONTRACT).unwrap()));
    assert_eq!(seen.len(), 2);

    let kinds: HashSet<AddressKind> = seen.iter().map(Address::kind).collect();
    assert_eq!(kinds.len(), 2);
}
