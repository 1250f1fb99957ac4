use serde_json::Value;

use crate::chain::errors::{ChainClientError, SubmitError};
use crate::core::address::Address;
use crate::core::token_amount::TokenAmount;
use crate::core::transaction::{CallPayload, SignedTransaction, TransactionParam};
use crate::core::wallet::Wallet;

/// The JSON-RPC v3 calls a wallet-side client needs.
///
/// Node-side error objects come back as [`ChainClientError::RemoteRpcError`] with the
/// node's code and message untouched.
pub trait RpcClient {
    /// `icx_getBalance`, in loop.
    fn get_balance(&self, address: &Address) -> Result<TokenAmount, ChainClientError>;

    /// `icx_call`: read-only contract query. Returns the raw `result` value.
    fn call(&self, payload: &CallPayload) -> Result<Value, ChainClientError>;

    /// `icx_sendTransaction`. Returns the `0x` transaction hash reported by the node.
    fn send_transaction(&self, tx: &SignedTransaction) -> Result<String, ChainClientError>;

    fn sign_and_send(&self, wallet: &Wallet, params: &TransactionParam) -> Result<String, SubmitError> {
        let signed = wallet.sign(params)?;
        Ok(self.send_transaction(&signed)?)
    }
}
