//! Web3 Secret Storage (version 3) keystores, the format ICON wallets use.
//!
//! Decryption derives a key from the passphrase with the file's KDF (scrypt or
//! pbkdf2-hmac-sha256), checks `keccak256(derived[16..32] ‖ ciphertext)` against the
//! stored MAC and only then runs AES-128-CTR over the ciphertext.

use std::fs;
use std::path::{Path, PathBuf};

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256};
use thiserror::Error;
use zeroize::Zeroizing;

use super::address::Address;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

const CIPHER: &str = "aes-128-ctr";
const PBKDF2_PRF: &str = "hmac-sha256";
const DERIVED_KEY_LEN: usize = 32;

#[derive(Error, Debug)]
pub enum KeystoreError {
    #[error("Keystore not readable at {path}: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid passphrase: keystore MAC mismatch")]
    InvalidPassphrase,

    #[error("Malformed keystore: {0}")]
    Malformed(String),

    #[error("Failed to write keystore to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Random number generator failure: {0}")]
    Rng(String),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeystoreFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(alias = "Crypto")]
    pub crypto: KeystoreCrypto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub version: u32,
    #[serde(rename = "coinType", default, skip_serializing_if = "Option::is_none")]
    pub coin_type: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeystoreCrypto {
    pub cipher: String,
    pub cipherparams: CipherParams,
    pub ciphertext: String,
    pub kdf: String,
    pub kdfparams: KdfParams,
    pub mac: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CipherParams {
    pub iv: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum KdfParams {
    Scrypt(ScryptParams),
    Pbkdf2(Pbkdf2Params),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScryptParams {
    pub dklen: usize,
    pub n: u64,
    pub r: u32,
    pub p: u32,
    pub salt: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Pbkdf2Params {
    pub c: u32,
    pub dklen: usize,
    pub prf: String,
    pub salt: String,
}

/// Key-derivation settings used when writing a new keystore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfConfig {
    Scrypt { n: u64, r: u32, p: u32 },
    Pbkdf2 { c: u32 },
}

impl Default for KdfConfig {
    fn default() -> Self {
        KdfConfig::Scrypt { n: 16384, r: 8, p: 1 }
    }
}

impl KeystoreFile {
    /// Reads and parses a keystore file without decrypting it.
    pub fn read(path: &Path) -> Result<Self, KeystoreError> {
        let json = fs::read_to_string(path).map_err(|source| KeystoreError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, KeystoreError> {
        serde_json::from_str(json)
            .map_err(|e| KeystoreError::Malformed(format!("parse error: {}", e)))
    }

    /// Writes the keystore as pretty JSON to a new location.
    pub fn write(&self, path: &Path) -> Result<(), KeystoreError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| KeystoreError::Malformed(format!("serialize error: {}", e)))?;
        fs::write(path, json).map_err(|source| KeystoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decrypts the 32-byte private key. Nothing derived from the passphrase outlives
    /// this call unless decryption succeeds.
    pub fn decrypt(&self, passphrase: &str) -> Result<Zeroizing<[u8; 32]>, KeystoreError> {
        if self.version != 3 {
            return Err(KeystoreError::Malformed(format!(
                "unsupported keystore version: {}",
                self.version
            )));
        }
        let crypto = &self.crypto;
        if crypto.cipher != CIPHER {
            return Err(KeystoreError::Malformed(format!("unsupported cipher: {}", crypto.cipher)));
        }

        let derived_key = derive_key(&crypto.kdf, &crypto.kdfparams, passphrase)?;

        let ciphertext = decode_hex_field("ciphertext", &crypto.ciphertext)?;
        let stored_mac = decode_hex_field("mac", &crypto.mac)?;
        if compute_mac(&derived_key[..], &ciphertext)[..] != stored_mac[..] {
            return Err(KeystoreError::InvalidPassphrase);
        }

        let iv = decode_hex_field("cipherparams.iv", &crypto.cipherparams.iv)?;
        let mut plaintext = Zeroizing::new(ciphertext);
        apply_cipher(&derived_key[..16], &iv, &mut plaintext[..])?;

        if plaintext.len() != 32 {
            return Err(KeystoreError::Malformed(format!(
                "decrypted key must be 32 bytes, got {}",
                plaintext.len()
            )));
        }
        let mut secret = Zeroizing::new([0u8; 32]);
        secret.copy_from_slice(&plaintext);
        Ok(secret)
    }
}

/// Encrypts `secret` into a fresh keystore for `address`.
pub fn encrypt_keystore(
    secret: &[u8; 32],
    passphrase: &str,
    address: &Address,
    kdf: KdfConfig,
) -> Result<KeystoreFile, KeystoreError> {
    let mut salt = [0u8; 32];
    let mut iv = [0u8; 16];
    getrandom::fill(&mut salt).map_err(|e| KeystoreError::Rng(e.to_string()))?;
    getrandom::fill(&mut iv).map_err(|e| KeystoreError::Rng(e.to_string()))?;

    let (kdf_name, kdfparams) = match kdf {
        KdfConfig::Scrypt { n, r, p } => (
            "scrypt",
            KdfParams::Scrypt(ScryptParams {
                dklen: DERIVED_KEY_LEN,
                n,
                r,
                p,
                salt: hex::encode(salt),
            }),
        ),
        KdfConfig::Pbkdf2 { c } => (
            "pbkdf2",
            KdfParams::Pbkdf2(Pbkdf2Params {
                c,
                dklen: DERIVED_KEY_LEN,
                prf: PBKDF2_PRF.to_string(),
                salt: hex::encode(salt),
            }),
        ),
    };

    let derived_key = derive_key(kdf_name, &kdfparams, passphrase)?;
    let mut ciphertext = secret.to_vec();
    apply_cipher(&derived_key[..16], &iv, &mut ciphertext)?;
    let mac = compute_mac(&derived_key[..], &ciphertext);

    Ok(KeystoreFile {
        address: Some(address.to_string()),
        crypto: KeystoreCrypto {
            cipher: CIPHER.to_string(),
            cipherparams: CipherParams { iv: hex::encode(iv) },
            ciphertext: hex::encode(&ciphertext),
            kdf: kdf_name.to_string(),
            kdfparams,
            mac: hex::encode(mac),
        },
        id: Some(uuid::Uuid::new_v4().to_string()),
        version: 3,
        coin_type: Some("icx".to_string()),
    })
}

fn derive_key(
    kdf: &str,
    params: &KdfParams,
    passphrase: &str,
) -> Result<Zeroizing<Vec<u8>>, KeystoreError> {
    match (kdf, params) {
        ("scrypt", KdfParams::Scrypt(p)) => {
            check_dklen(p.dklen)?;
            if p.n < 2 || !p.n.is_power_of_two() {
                return Err(KeystoreError::Malformed(format!("scrypt n must be a power of two, got {}", p.n)));
            }
            let log_n = p.n.trailing_zeros() as u8;
            let scrypt_params = scrypt::Params::new(log_n, p.r, p.p, p.dklen)
                .map_err(|e| KeystoreError::Malformed(format!("invalid scrypt params: {}", e)))?;
            let salt = decode_hex_field("kdfparams.salt", &p.salt)?;
            let mut derived = Zeroizing::new(vec![0u8; p.dklen]);
            scrypt::scrypt(passphrase.as_bytes(), &salt, &scrypt_params, &mut derived[..])
                .map_err(|e| KeystoreError::Malformed(format!("scrypt failed: {}", e)))?;
            Ok(derived)
        }
        ("pbkdf2", KdfParams::Pbkdf2(p)) => {
            check_dklen(p.dklen)?;
            if p.prf != PBKDF2_PRF {
                return Err(KeystoreError::Malformed(format!("unsupported pbkdf2 prf: {}", p.prf)));
            }
            if p.c == 0 {
                return Err(KeystoreError::Malformed("pbkdf2 iteration count must be positive".to_string()));
            }
            let salt = decode_hex_field("kdfparams.salt", &p.salt)?;
            let mut derived = Zeroizing::new(vec![0u8; p.dklen]);
            pbkdf2::pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), &salt, p.c, &mut derived[..]);
            Ok(derived)
        }
        (other, _) => Err(KeystoreError::Malformed(format!(
            "kdf '{}' does not match its kdfparams or is unsupported",
            other
        ))),
    }
}

fn check_dklen(dklen: usize) -> Result<(), KeystoreError> {
    if dklen < DERIVED_KEY_LEN {
        return Err(KeystoreError::Malformed(format!(
            "dklen must be at least {}, got {}",
            DERIVED_KEY_LEN, dklen
        )));
    }
    Ok(())
}

fn compute_mac(derived_key: &[u8], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(&derived_key[16..32]);
    hasher.update(ciphertext);
    let hash = hasher.finalize();

    let mut mac = [0u8; 32];
    mac.copy_from_slice(&hash);
    mac
}

fn apply_cipher(key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<(), KeystoreError> {
    let mut cipher = Aes128Ctr::new_from_slices(key, iv)
        .map_err(|_| KeystoreError::Malformed(format!("iv must be 16 bytes, got {}", iv.len())))?;
    cipher.apply_keystream(buf);
    Ok(())
}

fn decode_hex_field(field: &str, value: &str) -> Result<Vec<u8>, KeystoreError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|e| KeystoreError::Malformed(format!("{}: {}", field, e)))
}
