pub mod core;
pub mod chain;

// Re-export commonly used types for convenience
pub use crate::core::base_types::{Address, CallParams, ParamValue, SignedTransaction, TokenAmount, TransactionParam};
pub use crate::core::wallet::{SigningError, Wallet, WalletError};
pub use crate::chain::{ChainClient, NetworkProfile, RpcClient};
