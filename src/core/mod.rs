pub mod numeric;
pub mod address;
pub mod token_amount;
pub mod params;
pub mod serializer;
pub mod signatures;
pub mod transaction;
pub mod transaction_result;
pub mod keystore;
pub mod wallet;
pub mod base_types;  // Re-exports the commonly used types from the modules above
