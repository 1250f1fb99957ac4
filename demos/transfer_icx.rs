//! Sends ICX from a keystore wallet and waits for the result.
//!
//! Environment (a `.env` file is honoured):
//! - `ICON_NETWORK` (e.g. `lisbon`), or `ICON_RPC_URL` + `ICON_NID`
//! - `ICON_KEYSTORE`, `ICON_KEYSTORE_PASSWORD`
//! - `ICON_TRANSFER_TO`, `ICON_TRANSFER_AMOUNT` (ICX, e.g. `0.1`)
//!
//! Run with `RUST_LOG=debug cargo run --example transfer_icx` to see each RPC attempt.

use std::env;
use std::error::Error;

use icon_sdk::chain::{set_active_network, build_transfer, ChainClient, NetworkProfile, RpcClient};
use icon_sdk::core::numeric::icx_to_loop;
use icon_sdk::core::wallet::Wallet;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let profile = NetworkProfile::from_env()?;
    set_active_network(profile.clone());

    let wallet = Wallet::from_env("ICON_KEYSTORE", "ICON_KEYSTORE_PASSWORD")?;
    let client = ChainClient::for_network(&profile)?;

    let balance = client.get_balance(wallet.address())?;
    println!("{} holds {}", wallet.address(), balance);

    let to = env::var("ICON_TRANSFER_TO")?;
    let amount = icx_to_loop(&env::var("ICON_TRANSFER_AMOUNT")?)?;
    let tx = build_transfer(wallet.address().as_str(), &to, &amount)?;

    let tx_hash = client.sign_and_send(&wallet, &tx)?;
    println!("Submitted {}", tx_hash);

    let result = client.wait_for_transaction_result(&tx_hash, 60, 2.0)?;
    if result.status {
        println!("Executed in block {}, fee {}", result.block_height, result.fee());
    } else {
        let reason = result.failure.map(|f| f.message).unwrap_or_default();
        println!("Transaction failed in block {}: {}", result.block_height, reason);
    }
    Ok(())
}
