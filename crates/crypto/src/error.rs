//! Crypto errors

use thiserror::Error;

/// Errors from key provisioning and payload sealing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Missing or malformed key
    #[error("Key configuration error: {0}")]
    Config(String),

    /// Malformed hex input, wrong nonce length, or an undecodable plaintext
    #[error("Decode error: {0}")]
    Decode(String),

    /// Tag verification failed. Must not say whether the key, the nonce
    /// or the ciphertext was wrong.
    #[error("Authentication failed")]
    Authentication,

    /// Record could not be serialized before sealing
    #[error("Encode error: {0}")]
    Encode(String),
}
