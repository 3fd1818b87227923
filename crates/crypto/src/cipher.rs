//! AES-256-GCM payload sealing
//!
//! Each record is serialized to JSON and sealed under a fresh random 96-bit
//! nonce. Both halves travel as lowercase hex strings.

use crate::error::CryptoError;
use crate::key::CipherKey;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Nonce length in bytes (96 bits)
pub const NONCE_LEN: usize = 12;

/// Hex-encoded output of [`PayloadCipher::encrypt`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedPayload {
    /// 24 hex chars
    pub nonce: String,
    /// Ciphertext with the 16-byte tag appended
    pub ciphertext: String,
}

/// Authenticated encryption over a key fixed at construction.
///
/// Holds no mutable state, so a single instance can be shared across threads
/// (`&PayloadCipher` or `Arc<PayloadCipher>`) without locking.
pub struct PayloadCipher {
    aead: Aes256Gcm,
}

impl PayloadCipher {
    /// Create a cipher bound to `key` for its whole lifetime
    pub fn new(key: &CipherKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            aead: Aes256Gcm::new(key),
        }
    }

    /// Serialize and seal a record under a fresh random nonce
    pub fn encrypt<T: Serialize>(&self, record: &T) -> Result<SealedPayload, CryptoError> {
        let plaintext =
            serde_json::to_vec(record).map_err(|e| CryptoError::Encode(e.to_string()))?;

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .aead
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|_| CryptoError::Encode("AEAD encryption failed".to_string()))?;

        Ok(SealedPayload {
            nonce: hex::encode(nonce),
            ciphertext: hex::encode(ciphertext),
        })
    }

    /// Verify, open and deserialize a sealed record.
    ///
    /// No plaintext is ever returned unless the tag verifies.
    pub fn decrypt<T: DeserializeOwned>(
        &self,
        nonce_hex: &str,
        ciphertext_hex: &str,
    ) -> Result<T, CryptoError> {
        let nonce_bytes = hex::decode(nonce_hex)
            .map_err(|e| CryptoError::Decode(format!("Invalid nonce hex: {}", e)))?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CryptoError::Decode(format!(
                "Nonce must be {} bytes, got {}",
                NONCE_LEN,
                nonce_bytes.len()
            )));
        }

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| CryptoError::Decode(format!("Invalid ciphertext hex: {}", e)))?;

        let plaintext = self
            .aead
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
            .map_err(|_| CryptoError::Authentication)?;

        serde_json::from_slice(&plaintext)
            .map_err(|e| CryptoError::Decode(format!("Invalid payload: {}", e)))
    }

    /// Convenience wrapper over [`PayloadCipher::decrypt`]
    pub fn open<T: DeserializeOwned>(&self, sealed: &SealedPayload) -> Result<T, CryptoError> {
        self.decrypt(&sealed.nonce, &sealed.ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tollchain_core::{AcknowledgedRecord, Decision, DriverResponse, Event, Route, Toll};

    fn cipher() -> PayloadCipher {
        PayloadCipher::new(&CipherKey::from_hex(&"42".repeat(32)).unwrap())
    }

    fn record() -> AcknowledgedRecord {
        AcknowledgedRecord {
            event: Event::new("NJ-QRS5512", "George Washington Bridge", 120.0, 100.0, 0.6)
                .unwrap(),
            decision: Decision {
                toll: Toll::from_f64(2.2).unwrap(),
                route: Route::Alternate1,
                overspeed: true,
                decision_correct: false,
                comment: "Overspeed detected. Driver must confirm or reject guidance."
                    .to_string(),
            },
            driver_response: DriverResponse::Confirmed,
        }
    }

    fn flip_bit(hex_str: &str, bit: usize) -> String {
        let mut bytes = hex::decode(hex_str).unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);
        hex::encode(bytes)
    }

    #[test]
    fn test_roundtrip() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();
        let opened: AcknowledgedRecord = cipher.open(&sealed).unwrap();
        assert_eq!(opened, record());
    }

    #[test]
    fn test_nonce_is_24_hex_chars() {
        let sealed = cipher().encrypt(&record()).unwrap();
        assert_eq!(sealed.nonce.len(), NONCE_LEN * 2);
        assert!(sealed.nonce.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fresh_nonce_per_encryption() {
        let cipher = cipher();
        let a = cipher.encrypt(&record()).unwrap();
        let b = cipher.encrypt(&record()).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_every_nonce_bit_flip_fails_authentication() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();

        for bit in 0..NONCE_LEN * 8 {
            let tampered = flip_bit(&sealed.nonce, bit);
            let result = cipher.decrypt::<AcknowledgedRecord>(&tampered, &sealed.ciphertext);
            assert_eq!(result, Err(CryptoError::Authentication), "nonce bit {}", bit);
        }
    }

    #[test]
    fn test_every_ciphertext_bit_flip_fails_authentication() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();
        let total_bits = sealed.ciphertext.len() / 2 * 8;

        for bit in 0..total_bits {
            let tampered = flip_bit(&sealed.ciphertext, bit);
            let result = cipher.decrypt::<AcknowledgedRecord>(&sealed.nonce, &tampered);
            assert_eq!(result, Err(CryptoError::Authentication), "ciphertext bit {}", bit);
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let sealed = cipher().encrypt(&record()).unwrap();
        let other = PayloadCipher::new(&CipherKey::generate());
        let result = other.open::<AcknowledgedRecord>(&sealed);
        assert_eq!(result, Err(CryptoError::Authentication));
    }

    #[test]
    fn test_authentication_message_has_no_cause() {
        assert_eq!(CryptoError::Authentication.to_string(), "Authentication failed");
    }

    #[test]
    fn test_truncated_ciphertext_fails_authentication() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();
        let result = cipher.decrypt::<AcknowledgedRecord>(&sealed.nonce, &sealed.ciphertext[..20]);
        assert_eq!(result, Err(CryptoError::Authentication));
    }

    #[test]
    fn test_malformed_hex_is_decode_error() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();

        let bad_nonce = cipher.decrypt::<AcknowledgedRecord>("xyz", &sealed.ciphertext);
        assert!(matches!(bad_nonce, Err(CryptoError::Decode(_))));

        let bad_ct = cipher.decrypt::<AcknowledgedRecord>(&sealed.nonce, "not-hex");
        assert!(matches!(bad_ct, Err(CryptoError::Decode(_))));
    }

    #[test]
    fn test_short_nonce_is_decode_error() {
        let cipher = cipher();
        let sealed = cipher.encrypt(&record()).unwrap();
        let result = cipher.decrypt::<AcknowledgedRecord>(&sealed.nonce[..16], &sealed.ciphertext);
        assert!(matches!(result, Err(CryptoError::Decode(_))));
    }

    #[test]
    fn test_arbitrary_json_roundtrip() {
        let cipher = cipher();
        let value = serde_json::json!({"msg": "anything", "n": [1, 2, 3], "nested": {"ok": true}});
        let sealed = cipher.encrypt(&value).unwrap();
        let opened: serde_json::Value = cipher.open(&sealed).unwrap();
        assert_eq!(opened, value);
    }

    #[test]
    fn test_concurrent_use_without_locking() {
        let cipher = Arc::new(cipher());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cipher = Arc::clone(&cipher);
                std::thread::spawn(move || {
                    let sealed = cipher.encrypt(&record()).unwrap();
                    let opened: AcknowledgedRecord = cipher.open(&sealed).unwrap();
                    assert_eq!(opened, record());
                    sealed.nonce
                })
            })
            .collect();

        let mut nonces: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        nonces.sort();
        nonces.dedup();
        assert_eq!(nonces.len(), 8);
    }
}
