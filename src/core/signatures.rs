//! Recoverable secp256k1 signatures as ICON carries them: 65 bytes
//! `r ‖ s ‖ recovery_id`, base64 encoded in the transaction's `signature` field.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};
use thiserror::Error;

use super::address::Address;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid recovery id: expected 0 or 1, got {0}")]
    InvalidRecoveryId(u8),

    #[error("Invalid signature length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid base64 signature: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid signature format")]
    InvalidSignature,

    #[error("Failed to recover public key from signature")]
    RecoveryFailed,

    #[error("Signature verification failed: expected signer {expected}, recovered {recovered}")]
    SignerMismatch { expected: Address, recovered: Address },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    /// The r component of the signature (32 bytes)
    pub r: [u8; 32],
    /// The s component of the signature (32 bytes)
    pub s: [u8; 32],
    /// Public key recovery id, 0 or 1
    pub recovery_id: u8,
}

impl Signature {
    pub fn new(r: [u8; 32], s: [u8; 32], recovery_id: u8) -> Self {
        Self { r, s, recovery_id }
    }

    pub(crate) fn from_k256(signature: &K256Signature, recovery_id: RecoveryId) -> Self {
        let sig_bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&sig_bytes[0..32]);
        s.copy_from_slice(&sig_bytes[32..64]);
        Self::new(r, s, recovery_id.to_byte())
    }

    /// Returns the raw signature as a 65-byte array (r + s + recovery id).
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.recovery_id;
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != 65 {
            return Err(SignatureError::InvalidLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self::new(r, s, bytes[64]))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> Result<Self, SignatureError> {
        let bytes = STANDARD.decode(encoded)?;
        Self::from_bytes(&bytes)
    }

    /// Recovers the signer's address from a 32-byte prehash.
    pub fn recover_address(&self, hash: &[u8; 32]) -> Result<Address, SignatureError> {
        if self.recovery_id > 1 {
            return Err(SignatureError::InvalidRecoveryId(self.recovery_id));
        }
        let recovery_id = RecoveryId::from_byte(self.recovery_id)
            .ok_or(SignatureError::InvalidRecoveryId(self.recovery_id))?;

        let mut sig_bytes = [0u8; 64];
        sig_bytes[0..32].copy_from_slice(&self.r);
        sig_bytes[32..64].copy_from_slice(&self.s);
        let k256_sig = K256Signature::from_slice(&sig_bytes)
            .map_err(|_| SignatureError::InvalidSignature)?;

        let verifying_key = VerifyingKey::recover_from_prehash(hash, &k256_sig, recovery_id)
            .map_err(|_| SignatureError::RecoveryFailed)?;
        Ok(Address::from_public_key(&verifying_key))
    }

    /// Recovers the signer and checks it against `expected`.
    pub fn verify(&self, hash: &[u8; 32], expected: &Address) -> Result<(), SignatureError> {
        let recovered = self.recover_address(hash)?;
        if &recovered != expected {
            return Err(SignatureError::SignerMismatch {
                expected: expected.clone(),
                recovered,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &format_args!("0x{}", hex::encode(self.r)))
            .field("s", &format_args!("0x{}", hex::encode(self.s)))
            .field("recovery_id", &self.recovery_id)
            .finish()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}
