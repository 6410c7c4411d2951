// crates/core/src/secret.rs
//! Credential encryption at rest.
//!
//! AES-256-GCM keyed by the SHA-256 of an application secret, fresh random
//! 96-bit nonce per encryption. Wire format: `base64(nonce || ciphertext)`.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

use crate::error::SecretError;

/// Encrypt/decrypt pair applied to passwords at the config-store boundary.
///
/// Contract: `decrypt(encrypt(x)) == x` for all `x`.
pub trait SecretCodec: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, SecretError>;
    fn decrypt(&self, ciphertext: &str) -> Result<String, SecretError>;
}

/// Baked-in application secret. Keeps credentials unreadable under casual
/// file inspection; not a defense against an attacker holding the binary.
const APP_SECRET: &str = "PHtbiVY0URXE4kbtvyBq38JXVgvSRW8yI6qQfuD8+yhA2SVfi6w4YSjBrnGHI93W";

const NONCE_LEN: usize = 12;

/// AES-256-GCM implementation of [`SecretCodec`].
#[derive(Clone)]
pub struct AesGcmCodec {
    cipher: Aes256Gcm,
}

impl AesGcmCodec {
    /// Codec keyed by the SHA-256 digest of `secret`.
    pub fn new(secret: &str) -> Self {
        let key_bytes: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
        Self { cipher }
    }
}

impl Default for AesGcmCodec {
    fn default() -> Self {
        Self::new(APP_SECRET)
    }
}

impl SecretCodec for AesGcmCodec {
    fn encrypt(&self, plaintext: &str) -> Result<String, SecretError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| SecretError::Encrypt)?;

        // Wire format: nonce (12 bytes) || ciphertext
        let mut wire = nonce.to_vec();
        wire.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(wire))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, SecretError> {
        let wire = STANDARD.decode(ciphertext)?;
        if wire.len() < NONCE_LEN {
            return Err(SecretError::Truncated);
        }
        let (nonce, ct) = wire.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ct)
            .map_err(|_| SecretError::Decrypt)?;
        Ok(String::from_utf8(plaintext)?)
    }
}
