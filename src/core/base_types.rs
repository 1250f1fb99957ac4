//! Base types module that re-exports all core types.
//!
//! This module provides a convenient way to import all base types from a single location.

pub use super::address::{Address, AddressError, AddressKind};

pub use super::params::{CallParams, ParamValue};

pub use super::signatures::{Signature, SignatureError};

pub use super::token_amount::{TokenAmount, TokenAmountError};

pub use super::transaction::{
    CallData, CallPayload, DeployData, SignedTransaction, TransactionData, TransactionParam,
};

pub use super::transaction_result::{
    EventLog, Failure, TransactionResult, TransactionResultError,
};
