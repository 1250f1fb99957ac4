pub mod chain_client;
pub mod errors;
pub mod network;
pub mod parsers;
pub mod result_polling;
pub mod rpc;
pub mod transaction_builder;

pub use chain_client::ChainClient;
pub use errors::{ChainClientCreationError, ChainClientError, SubmitError};
pub use network::{active_network, clear_active_network, set_active_network, NetworkError, NetworkProfile};
pub use rpc::RpcClient;
pub use transaction_builder::{build_call, build_transfer, TransactionBuilder, TransactionBuilderError};
