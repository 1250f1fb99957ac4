//! The active network is process-wide, so everything touching it runs in one test.

use icon_sdk::chain::network::{
    active_network, clear_active_network, set_active_network, NetworkError, NetworkProfile, CATALOG,
};
use icon_sdk::chain::transaction_builder::{build_call, build_transfer, TransactionBuilderError};
use icon_sdk::core::address::AddressError;
use icon_sdk::core::params::CallParams;
use num_bigint::BigUint;
use serde_json::json;

const FROM: &str = "hxbe258ceb872e08851f1f59694dac2558708ece11";
const TO: &str = "hx9c13cd371aed69c79870b3a3f7492c10122f0315";
const CONTRACT: &str = "cx26a32e36df0a408a573163d05b3043c180359735";

#[test]
fn test_active_network_lifecycle() {
    // ========== Before any network is set ==========
    clear_active_network();
    assert_eq!(active_network(), Err(NetworkError::NoActiveNetwork));

    let amount = BigUint::from(100_000_000_000_000_000u64);
    assert!(matches!(
        build_transfer(FROM, TO, &amount),
        Err(TransactionBuilderError::Network(NetworkError::NoActiveNetwork))
    ));

    // ========== After set_active_network ==========
    set_active_network(NetworkProfile::lisbon());
    assert_eq!(active_network().unwrap(), NetworkProfile::lisbon());

    let tx = build_transfer(FROM, TO, &amount).unwrap();
    assert_eq!(tx.value(), Some("0x16345785d8a0000"));
    assert_eq!(tx.version(), "0x3");
    assert_eq!(tx.nid(), active_network().unwrap().nid_hex());

    let call = build_call(CONTRACT, "name", CallParams::new()).unwrap();
    assert!(call.value().is_none());
    assert_eq!(call.to_json().unwrap()["data"], json!({ "method": "name", "params": {} }));
    assert_eq!(call.nid(), "0x2");

    assert!(matches!(
        build_call(TO, "name", CallParams::new()),
        Err(TransactionBuilderError::InvalidAddress(AddressError::NotAContract(_)))
    ));
    assert!(matches!(
        build_transfer(CONTRACT, TO, &amount),
        Err(TransactionBuilderError::InvalidAddress(AddressError::NotAnAccount(_)))
    ));

    // ========== Replacing the active network ==========
    set_active_network(NetworkProfile::berlin());
    assert_eq!(build_transfer(FROM, TO, &amount).unwrap().nid(), "0x7");

    // ========== Concurrent readers ==========
    let readers: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| active_network().map(|p| p.nid())))
        .collect();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), Ok(7));
    }

    // ========== from_env ==========
    std::env::set_var("ICON_NETWORK", "Mainnet");
    assert_eq!(NetworkProfile::from_env().unwrap(), NetworkProfile::mainnet());

    std::env::set_var("ICON_NETWORK", "nowhere");
    assert!(matches!(NetworkProfile::from_env(), Err(NetworkError::UnknownNetwork(_))));

    std::env::remove_var("ICON_NETWORK");
    std::env::set_var("ICON_RPC_URL", "http://127.0.0.1:9000/api/v3");
    std::env::set_var("ICON_NID", "0x50");
    let custom = NetworkProfile::from_env().unwrap();
    assert_eq!(custom.nid(), 0x50);
    assert_eq!(custom.url().as_str(), "http://127.0.0.1:9000/api/v3");

    std::env::set_var("ICON_NID", "80");
    assert_eq!(NetworkProfile::from_env().unwrap().nid(), 80);

    std::env::remove_var("ICON_NID");
    assert!(matches!(NetworkProfile::from_env(), Err(NetworkError::LoadVar(_))));
    std::env::remove_var("ICON_RPC_URL");

    // ========== Cleared again ==========
    clear_active_network();
    assert_eq!(active_network(), Err(NetworkError::NoActiveNetwork));
}

#[test]
fn test_catalog() {
    let catalog = NetworkProfile::catalog();
    let nids: Vec<u64> = catalog.iter().map(NetworkProfile::nid).collect();
    assert_eq!(nids, vec![0x1, 0x2, 0x7, 0x3]);

    assert_eq!(NetworkProfile::mainnet().url().as_str(), "https://ctz.solidwallet.io/api/v3");
    assert_eq!(NetworkProfile::lisbon().url().as_str(), "https://lisbon.net.solidwallet.io/api/v3");
    assert_eq!(NetworkProfile::berlin().url().as_str(), "https://berlin.net.solidwallet.io/api/v3");
    assert_eq!(NetworkProfile::localhost().url().as_str(), "http://localhost:9082/api/v3");
    assert_eq!(NetworkProfile::by_name("BERLIN").unwrap().nid_hex(), "0x7");
}

#[test]
fn test_catalog_entries_pass_validation() {
    for (name, nid, url) in CATALOG {
        let profile = NetworkProfile::new(name, nid, url).unwrap();
        assert_eq!(NetworkProfile::by_name(name).unwrap(), profile);
    }
}

#[test]
fn test_profile_validation() {
    assert!(matches!(
        NetworkProfile::new("", 1, "http://localhost:9082/api/v3"),
        Err(NetworkError::InvalidProfile(_))
    ));
    assert!(matches!(
        NetworkProfile::new("zero", 0, "http://localhost:9082/api/v3"),
        Err(NetworkError::InvalidProfile(_))
    ));
    assert!(matches!(
        NetworkProfile::new("bad", 1, "not a url"),
        Err(NetworkError::InvalidProfile(_))
    ));
    assert!(matches!(
        NetworkProfile::new("ftp", 1, "ftp://localhost/api/v3"),
        Err(NetworkError::InvalidProfile(_))
    ));
}

#[test]
fn test_profile_display() {
    assert_eq!(NetworkProfile::berlin().to_string(), "berlin (nid 0x7)");
}
