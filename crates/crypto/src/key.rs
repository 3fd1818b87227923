//! Symmetric key provisioning
//!
//! The key is supplied out-of-band as 64 hex characters, normally through the
//! `TOLLCHAIN_KEY_HEX` environment variable. There is no silent fallback: a
//! missing key is a `CryptoError::Config`. The fixed demo key is only handed
//! out by [`CipherKey::insecure_demo`], which callers must opt into.

use crate::error::CryptoError;
use rand::RngCore;
use std::env::VarError;
use std::fmt;

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Environment variable read by [`CipherKey::from_default_env`]
pub const DEFAULT_KEY_ENV_VAR: &str = "TOLLCHAIN_KEY_HEX";

/// INSECURE: publicly known demo key. Never use outside demos and tests.
const INSECURE_DEMO_KEY_HEX: &str =
    "00112233445566778899AABBCCDDEEFF00112233445566778899AABBCCDDEEFF";

/// 256-bit symmetric key
#[derive(Clone, PartialEq, Eq)]
pub struct CipherKey {
    bytes: [u8; KEY_LEN],
}

impl CipherKey {
    /// Wrap raw key bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Parse a 64-character hex key (surrounding whitespace ignored)
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_key.trim())
            .map_err(|e| CryptoError::Config(format!("Invalid key hex: {}", e)))?;

        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            CryptoError::Config(format!(
                "Key must be {} bytes ({} hex chars), got {} bytes",
                KEY_LEN,
                KEY_LEN * 2,
                v.len()
            ))
        })?;

        Ok(Self { bytes })
    }

    /// Read the key from an environment variable
    pub fn from_env(var: &str) -> Result<Self, CryptoError> {
        let value = std::env::var(var).map_err(|e| match e {
            VarError::NotPresent => CryptoError::Config(format!("{} is not set", var)),
            VarError::NotUnicode(_) => CryptoError::Config(format!("{} is not valid UTF-8", var)),
        })?;
        Self::from_hex(&value)
    }

    /// Read the key from `TOLLCHAIN_KEY_HEX`
    pub fn from_default_env() -> Result<Self, CryptoError> {
        Self::from_env(DEFAULT_KEY_ENV_VAR)
    }

    /// INSECURE: the fixed, publicly known demo key.
    ///
    /// Anyone can decrypt records sealed with it. Only for demos and tests.
    pub fn insecure_demo() -> Self {
        tracing::warn!("using the INSECURE demo key; sealed records are not confidential");
        let mut bytes = [0u8; KEY_LEN];
        // Constant is valid hex of the right length
        if let Ok(decoded) = hex::decode(INSECURE_DEMO_KEY_HEX) {
            bytes.copy_from_slice(&decoded);
        }
        Self { bytes }
    }

    /// Generate a new random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Export as lowercase hex (for `keygen`)
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for CipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CipherKey(<redacted>)")
    }
}
