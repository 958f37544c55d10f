//! AES-GCM-SIV encryption and decryption of card numbers.
//!
//! **Algorithm choice:** AES-GCM-SIV (RFC 8452) with a 96-bit nonce and a
//! 128-bit tag. A fresh nonce is drawn from the OS CSPRNG for every call, so
//! sealing the same number twice yields different blobs. Should a nonce ever
//! repeat, GCM-SIV only reveals that the two plaintexts were equal.
//!
//! **Blob layout:** `base64(nonce || ciphertext || tag)` using the standard
//! alphabet with padding. Decoding is strict, so non-canonical encodings of
//! the same bytes are rejected.

use aes_gcm_siv::{
    aead::{rand_core::RngCore, Aead, Error as AeadError, KeyInit, OsRng},
    Aes128GcmSiv, Aes256GcmSiv, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use super::key::{EncryptionKey, AES128_KEY_LEN, AES256_KEY_LEN};

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key material is neither 16 nor 32 bytes.
    #[error("invalid key length: expected {AES128_KEY_LEN} or {AES256_KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The OS random source could not produce a nonce.
    #[error("failed to generate nonce")]
    NonceGeneration,

    /// AES-GCM-SIV sealing failed.
    #[error("aead seal failed")]
    Encryption,

    /// The blob is malformed, was tampered with, or was sealed under another key.
    ///
    /// A single variant covers every decrypt-path failure so that callers
    /// cannot learn which check rejected the input.
    #[error("decryption failed")]
    Decryption,
}

/// A decoded blob split into its nonce and sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedCard {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext followed by the authentication tag.
    pub sealed: Vec<u8>,
}

impl SealedCard {
    /// Encode to the wire representation.
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(NONCE_LEN + self.sealed.len());
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.sealed);
        STANDARD.encode(raw)
    }

    /// Parse the wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Decryption`] if `blob` is not valid base64 or
    /// is too short to hold a nonce and a tag.
    pub fn decode(blob: &str) -> Result<Self, CipherError> {
        let raw = STANDARD.decode(blob).map_err(|_| CipherError::Decryption)?;
        if raw.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Decryption);
        }
        let (nonce_bytes, sealed) = raw.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self {
            nonce,
            sealed: sealed.to_vec(),
        })
    }
}

/// AES-GCM-SIV instance sized to the configured key.
enum CardCipher {
    Aes128(Aes128GcmSiv),
    Aes256(Aes256GcmSiv),
}

impl CardCipher {
    fn new(key: &EncryptionKey) -> Result<Self, CipherError> {
        let bytes = key.as_bytes();
        let cipher = match bytes.len() {
            AES128_KEY_LEN => Aes128GcmSiv::new_from_slice(bytes).map(Self::Aes128),
            AES256_KEY_LEN => Aes256GcmSiv::new_from_slice(bytes).map(Self::Aes256),
            n => return Err(CipherError::InvalidKeyLength(n)),
        };
        cipher.map_err(|_| CipherError::InvalidKeyLength(bytes.len()))
    }

    fn seal(&self, nonce: &Nonce, plaintext: &[u8]) -> Result<Vec<u8>, AeadError> {
        match self {
            Self::Aes128(c) => c.encrypt(nonce, plaintext),
            Self::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    fn open(&self, nonce: &Nonce, sealed: &[u8]) -> Result<Vec<u8>, AeadError> {
        match self {
            Self::Aes128(c) => c.decrypt(nonce, sealed),
            Self::Aes256(c) => c.decrypt(nonce, sealed),
        }
    }
}

/// Encrypt a card number and return the base64 blob.
///
/// No associated data is bound to the ciphertext.
///
/// # Errors
///
/// Returns [`CipherError::NonceGeneration`] if the OS random source fails and
/// [`CipherError::Encryption`] on an internal AEAD error. Neither is retried.
pub fn encrypt(number: &str, key: &EncryptionKey) -> Result<String, CipherError> {
    let cipher = CardCipher::new(key)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|_| CipherError::NonceGeneration)?;

    let sealed = cipher
        .seal(Nonce::from_slice(&nonce), number.as_bytes())
        .map_err(|_| CipherError::Encryption)?;

    Ok(SealedCard { nonce, sealed }.encode())
}

/// Decrypt a blob produced by [`encrypt`] back to the original card number.
///
/// # Errors
///
/// Returns [`CipherError::Decryption`] for a malformed blob, a failed tag
/// check, or a plaintext that is not UTF-8. No partial plaintext is returned.
pub fn decrypt(blob: &str, key: &EncryptionKey) -> Result<String, CipherError> {
    let cipher = CardCipher::new(key)?;
    let parsed = SealedCard::decode(blob)?;
    let plaintext = cipher
        .open(Nonce::from_slice(&parsed.nonce), &parsed.sealed)
        .map_err(|_| CipherError::Decryption)?;
    String::from_utf8(plaintext).map_err(|_| CipherError::Decryption)
}
