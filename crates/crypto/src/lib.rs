//! TollChain Crypto - Confidentiality layer
//!
//! # Key Types
//! - `CipherKey`: 256-bit symmetric key, provisioned out-of-band as 64 hex characters
//! - `PayloadCipher`: AES-256-GCM sealing of structured records
//! - `SealedPayload`: Hex-encoded `(nonce, ciphertext)` pair

pub mod cipher;
pub mod error;
pub mod key;

pub use cipher::{PayloadCipher, SealedPayload, NONCE_LEN};
pub use error::CryptoError;
pub use key::{CipherKey, DEFAULT_KEY_ENV_VAR, KEY_LEN};
