//! Network profiles and the process-wide active-network registry.
//!
//! Builders read the active profile for the `nid` field unless they are given one
//! explicitly. Set the network once at startup, or pass profiles around and leave
//! the registry empty.

use std::env::{self, VarError};
use std::fmt;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::core::numeric;

/// Built-in networks as `(name, nid, url)`.
pub const CATALOG: [(&str, u64, &str); 4] = [
    ("mainnet", 0x1, "https://ctz.solidwallet.io/api/v3"),
    ("lisbon", 0x2, "https://lisbon.net.solidwallet.io/api/v3"),
    ("berlin", 0x7, "https://berlin.net.solidwallet.io/api/v3"),
    ("localhost", 0x3, "http://localhost:9082/api/v3"),
];

static ACTIVE: Lazy<RwLock<Option<NetworkProfile>>> = Lazy::new(|| RwLock::new(None));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("No active network: call set_active_network first")]
    NoActiveNetwork,

    #[error("Invalid network profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown network name: {0}")]
    UnknownNetwork(String),

    #[error("Couldn't load a variable: {0}")]
    LoadVar(#[from] VarError),
}

/// Name, network id and JSON-RPC endpoint of one ICON network.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    name: String,
    nid: u64,
    url: Url,
}

impl NetworkProfile {
    /// Validates and builds a profile.
    ///
    /// # Examples
    /// ```
    /// # use icon_sdk::chain::network::NetworkProfile;
    /// let custom = NetworkProfile::new("devnet", 0x50, "http://127.0.0.1:9080/api/v3")?;
    /// assert_eq!(custom.nid_hex(), "0x50");
    /// # Ok::<(), icon_sdk::chain::network::NetworkError>(())
    /// ```
    pub fn new(name: &str, nid: u64, url: &str) -> Result<Self, NetworkError> {
        if name.trim().is_empty() {
            return Err(NetworkError::InvalidProfile("name must not be empty".to_string()));
        }
        if nid == 0 {
            return Err(NetworkError::InvalidProfile(format!("nid of '{}' must be non-zero", name)));
        }
        let url = Url::parse(url)
            .map_err(|e| NetworkError::InvalidProfile(format!("invalid url '{}': {}", url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NetworkError::InvalidProfile(format!(
                "url scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(Self {
            name: name.to_string(),
            nid,
            url,
        })
    }

    fn known(index: usize) -> Self {
        let (name, nid, url) = CATALOG[index];
        Self::new(name, nid, url).unwrap_or_else(|e| unreachable!("catalog entry '{}': {}", name, e))
    }

    pub fn mainnet() -> Self {
        Self::known(0)
    }

    pub fn lisbon() -> Self {
        Self::known(1)
    }

    pub fn berlin() -> Self {
        Self::known(2)
    }

    pub fn localhost() -> Self {
        Self::known(3)
    }

    pub fn catalog() -> Vec<NetworkProfile> {
        (0..CATALOG.len()).map(Self::known).collect()
    }

    /// Case-insensitive lookup in the catalog.
    pub fn by_name(name: &str) -> Result<Self, NetworkError> {
        Self::catalog()
            .into_iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| NetworkError::UnknownNetwork(name.to_string()))
    }

    /// Reads the profile from the environment.
    ///
    /// `ICON_NETWORK` selects a catalog entry by name. Without it, `ICON_RPC_URL`
    /// and `ICON_NID` (decimal or `0x` hex) describe a custom network.
    pub fn from_env() -> Result<Self, NetworkError> {
        if let Ok(name) = env::var("ICON_NETWORK") {
            return Self::by_name(&name);
        }
        let url = env::var("ICON_RPC_URL")?;
        let nid_raw = env::var("ICON_NID")?;
        let nid = parse_nid(&nid_raw)?;
        Self::new("custom", nid, &url)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nid(&self) -> u64 {
        self.nid
    }

    /// Network id as it appears in the `nid` transaction field.
    pub fn nid_hex(&self) -> String {
        numeric::u64_to_hex(self.nid)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Debug for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkProfile")
            .field("name", &self.name)
            .field("nid", &format_args!("{}", self.nid_hex()))
            .field("url", &self.url.as_str())
            .finish()
    }
}

impl fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (nid {})", self.name, self.nid_hex())
    }
}

fn parse_nid(raw: &str) -> Result<u64, NetworkError> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x") {
        Some(hex_str) => u64::from_str_radix(hex_str, 16),
        None => raw.parse::<u64>(),
    };
    parsed.map_err(|_| NetworkError::InvalidProfile(format!("invalid nid: '{}'", raw)))
}

/// Replaces the process-wide active network.
pub fn set_active_network(profile: NetworkProfile) {
    info!(network = %profile.name, nid = %profile.nid_hex(), url = %profile.url, "active network set");
    *ACTIVE.write() = Some(profile);
}

/// Snapshot of the active network.
pub fn active_network() -> Result<NetworkProfile, NetworkError> {
    ACTIVE.read().clone().ok_or(NetworkError::NoActiveNetwork)
}

pub fn clear_active_network() {
    debug!("active network cleared");
    *ACTIVE.write() = None;
}
