//! Keystore-backed wallet that owns a secp256k1 private key.
//!
//! All key operations go through `Wallet`; the key itself is never handed out and
//! is zeroized when the wallet is dropped (`SigningKey` clears itself).

use std::env::{self, VarError};
use std::fmt;
use std::path::Path;

use k256::ecdsa::{SigningKey, VerifyingKey};
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use super::address::Address;
use super::keystore::{encrypt_keystore, KdfConfig, KeystoreError, KeystoreFile};
use super::serializer::SerializationError;
use super::signatures::{Signature, SignatureError};
use super::transaction::{SignedTransaction, TransactionParam};

pub struct Wallet {
    private_key: SigningKey,
    address: Address,
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[derive(Error, Debug)]
pub enum WalletError {
    #[error(transparent)]
    Keystore(#[from] KeystoreError),

    #[error("Couldn't load a variable: {0}")]
    LoadVar(#[from] VarError),

    #[error("Invalid key length: expected 32 bytes, got {0} bytes")]
    InvalidKeyLength(usize),

    #[error("Invalid hex string: {0}")]
    HexDecode(String),

    #[error("Invalid private key: key is not valid for secp256k1 curve")]
    InvalidPrivateKey,

    #[error("Random number generator failure: {0}")]
    Rng(String),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("Transaction sender {declared} does not match wallet address {wallet}")]
    SenderMismatch { declared: Address, wallet: Address },

    #[error("Failed to serialize transaction: {0}")]
    Serialization(#[from] SerializationError),

    #[error("ECDSA signing failed: {0}")]
    Ecdsa(String),

    #[error("Signature verification error: {0}")]
    Verification(#[from] SignatureError),
}

impl Wallet {
    fn from_signing_key(private_key: SigningKey) -> Self {
        let address = Address::from_public_key(private_key.verifying_key());
        Wallet { private_key, address }
    }

    fn from_secret(secret: &[u8]) -> Result<Self, WalletError> {
        if secret.len() != 32 {
            return Err(WalletError::InvalidKeyLength(secret.len()));
        }
        let private_key = SigningKey::from_slice(secret)
            .map_err(|_| WalletError::InvalidPrivateKey)?;
        Ok(Self::from_signing_key(private_key))
    }

    /// Loads a wallet from an encrypted keystore file.
    ///
    /// A wrong passphrase surfaces as `KeystoreError::InvalidPassphrase`. A recorded
    /// address that differs from the decrypted key, or a key that is not a valid
    /// secp256k1 scalar, is `KeystoreError::Malformed`.
    ///
    /// # Examples
    /// ```no_run
    /// # use icon_sdk::core::wallet::Wallet;
    /// let wallet = Wallet::load("keystore.json", "passphrase")?;
    /// println!("{}", wallet.address());
    /// # Ok::<(), icon_sdk::core::wallet::WalletError>(())
    /// ```
    pub fn load(path: impl AsRef<Path>, passphrase: &str) -> Result<Wallet, WalletError> {
        let path = path.as_ref();
        let keystore = KeystoreFile::read(path)?;
        let secret = keystore.decrypt(passphrase)?;
        let wallet = Self::from_secret(&secret[..])
            .map_err(|e| KeystoreError::Malformed(format!("decrypted key is unusable: {}", e)))?;

        if let Some(stored) = &keystore.address {
            if !stored.eq_ignore_ascii_case(wallet.address.as_str()) {
                return Err(KeystoreError::Malformed(format!(
                    "address {} does not match the decrypted key ({})",
                    stored, wallet.address
                ))
                .into());
            }
        }
        debug!(address = %wallet.address, path = %path.display(), "wallet loaded from keystore");
        Ok(wallet)
    }

    /// Loads a keystore whose path and passphrase come from environment variables.
    pub fn from_env(path_var: &str, passphrase_var: &str) -> Result<Wallet, WalletError> {
        let path = env::var(path_var)?;
        let passphrase = Zeroizing::new(env::var(passphrase_var)?);
        Self::load(path, &passphrase)
    }

    /// Parses a raw private key: 64 hex characters, with or without `0x`.
    pub fn from_private_key_hex(key_hex: &str) -> Result<Wallet, WalletError> {
        let hex_str = key_hex.strip_prefix("0x").unwrap_or(key_hex);
        let key_vec = Zeroizing::new(
            hex::decode(hex_str).map_err(|e| WalletError::HexDecode(e.to_string()))?,
        );
        Self::from_secret(&key_vec)
    }

    /// Generates a new wallet with a cryptographically secure random private key.
    pub fn generate() -> Result<Wallet, WalletError> {
        // Out-of-range scalars are astronomically rare; retry until one is valid.
        loop {
            let mut raw_key = Zeroizing::new([0u8; 32]);
            getrandom::fill(&mut raw_key[..]).map_err(|e| WalletError::Rng(e.to_string()))?;
            if let Ok(private_key) = SigningKey::from_slice(&raw_key[..]) {
                return Ok(Self::from_signing_key(private_key));
            }
        }
    }

    /// Writes this wallet's key to a new keystore file.
    pub fn save_keystore(
        &self,
        path: impl AsRef<Path>,
        passphrase: &str,
        kdf: KdfConfig,
    ) -> Result<(), WalletError> {
        let key_bytes = Zeroizing::new(self.private_key.to_bytes());
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&key_bytes);
        let keystore = encrypt_keystore(&secret, passphrase, &self.address, kdf)?;
        keystore.write(path.as_ref())?;
        Ok(())
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key(&self) -> VerifyingKey {
        *self.private_key.verifying_key()
    }

    /// Signs transaction parameters.
    ///
    /// The canonical serialization is hashed with SHA3-256 and signed with a
    /// recoverable ECDSA signature. A transaction without a sender is bound to this
    /// wallet's address; one naming another sender is refused.
    pub fn sign(&self, tx: &TransactionParam) -> Result<SignedTransaction, SigningError> {
        let params = match tx.from() {
            Some(declared) if declared != &self.address => {
                return Err(SigningError::SenderMismatch {
                    declared: declared.clone(),
                    wallet: self.address.clone(),
                });
            }
            Some(_) => tx.clone(),
            None => tx.with_sender(self.address.clone()),
        };

        let hash = params.hash()?;
        let signature = self.sign_hash(&hash)?;

        // Checked against the sender before it is handed out.
        Ok(SignedTransaction::new(params, signature, hash)?)
    }

    /// Signs an arbitrary 32-byte digest.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<Signature, SigningError> {
        let (signature, recovery_id) = self
            .private_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| SigningError::Ecdsa(e.to_string()))?;
        Ok(Signature::from_k256(&signature, recovery_id))
    }
}
