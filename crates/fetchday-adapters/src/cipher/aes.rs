//! AES-256-GCM encryption of puzzle input.
//!
//! Stored form: `base64(nonce ‖ ciphertext)` with the standard alphabet and
//! padding. The 12-byte nonce is random per encryption.

use std::fmt;

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::instrument;

use fetchday_core::{
    application::{ApplicationError, ports::DataCipher},
    error::FetchDayResult,
};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    /// Build a cipher from raw key bytes. Anything but 32 bytes is rejected.
    pub fn new(key: &[u8]) -> FetchDayResult<Self> {
        if key.len() != KEY_LEN {
            return Err(ApplicationError::InvalidKey {
                reason: format!("expected {KEY_LEN} bytes, got {}", key.len()),
            }
            .into());
        }

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|e| ApplicationError::InvalidKey {
            reason: e.to_string(),
        })?;
        Ok(Self { cipher })
    }

    /// Build a cipher from a key given as text, e.g. `AOC_AES_KEY`.
    pub fn from_text(key: &str) -> FetchDayResult<Self> {
        Self::new(key.as_bytes())
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AesGcmCipher { .. }")
    }
}

fn decryption_failed(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::DecryptionFailed {
        path: Default::default(),
        reason: reason.into(),
    }
}

impl DataCipher for AesGcmCipher {
    #[instrument(skip_all, fields(len = plaintext.len()))]
    fn encrypt(&self, plaintext: &[u8]) -> FetchDayResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| ApplicationError::EncryptionFailed {
                reason: e.to_string(),
            })?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(sealed))
    }

    #[instrument(skip_all, fields(len = encoded.len()))]
    fn decrypt(&self, encoded: &str) -> FetchDayResult<Vec<u8>> {
        let sealed = STANDARD
            .decode(encoded.trim())
            .map_err(|e| decryption_failed(format!("invalid base64: {e}")))?;

        if sealed.len() < NONCE_LEN {
            return Err(decryption_failed(format!(
                "payload is {} bytes, shorter than the {NONCE_LEN}-byte nonce",
                sealed.len()
            ))
            .into());
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| decryption_failed("authentication failed (wrong key or corrupted data)"))?;

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchday_core::error::FetchDayError;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn reason(err: FetchDayError) -> String {
        match err {
            FetchDayError::Application(ApplicationError::DecryptionFailed { reason, .. }) => {
                reason
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn round_trip_restores_plaintext() {
        let cipher = AesGcmCipher::from_text(KEY).unwrap();
        let sealed = cipher.encrypt(b"1000\n2000\n\n3000").unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), b"1000\n2000\n\n3000");
    }

    #[test]
    fn nonce_is_fresh_per_encryption() {
        let cipher = AesGcmCipher::from_text(KEY).unwrap();
        assert_ne!(cipher.encrypt(b"same").unwrap(), cipher.encrypt(b"same").unwrap());
    }

    #[test]
    fn stored_form_is_nonce_then_ciphertext() {
        let cipher = AesGcmCipher::from_text(KEY).unwrap();
        let sealed = STANDARD.decode(cipher.encrypt(b"abc").unwrap()).unwrap();
        // 16-byte GCM tag
        assert_eq!(sealed.len(), NONCE_LEN + 3 + 16);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = AesGcmCipher::from_text(KEY).unwrap().encrypt(b"abc").unwrap();
        let other = AesGcmCipher::from_text("fedcba9876543210fedcba9876543210").unwrap();
        assert!(reason(other.decrypt(&sealed).unwrap_err()).contains("authentication"));
    }

    #[test]
    fn short_payload_is_rejected() {
        let cipher = AesGcmCipher::from_text(KEY).unwrap();
        let short = STANDARD.encode([0u8; 4]);
        assert!(reason(cipher.decrypt(&short).unwrap_err()).contains("shorter"));
    }

    #[test]
    fn bad_base64_is_rejected() {
        let cipher = AesGcmCipher::from_text(KEY).unwrap();
        assert!(reason(cipher.decrypt("not base64!").unwrap_err()).contains("base64"));
    }

    #[test]
    fn key_length_is_checked() {
        assert!(matches!(
            AesGcmCipher::from_text("too short"),
            Err(FetchDayError::Application(ApplicationError::InvalidKey { .. }))
        ));
    }
}
