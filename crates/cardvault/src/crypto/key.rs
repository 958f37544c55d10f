//! [`EncryptionKey`]: the process-wide symmetric key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::cipher::CipherError;

/// Key length selecting AES-128-GCM-SIV.
pub const AES128_KEY_LEN: usize = 16;

/// Key length selecting AES-256-GCM-SIV.
pub const AES256_KEY_LEN: usize = 32;

/// Symmetric key loaded once at startup and shared read-only by every request.
///
/// Deliberately not `Clone`: the server holds a single instance behind an
/// `Arc`. When dropped, the key bytes are overwritten with zeroes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: Box<[u8]>,
}

impl EncryptionKey {
    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKeyLength`] unless `bytes` is exactly
    /// [`AES128_KEY_LEN`] or [`AES256_KEY_LEN`] bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        match bytes.len() {
            AES128_KEY_LEN | AES256_KEY_LEN => Ok(Self {
                bytes: bytes.into(),
            }),
            n => Err(CipherError::InvalidKeyLength(n)),
        }
    }

    /// Key size in bits (128 or 256).
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub(super) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, even in debug builds.
        f.write_str("EncryptionKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_aes_key_sizes() {
        assert_eq!(EncryptionKey::from_bytes(&[1u8; 16]).unwrap().bits(), 128);
        assert_eq!(EncryptionKey::from_bytes(&[1u8; 32]).unwrap().bits(), 256);
    }

    #[test]
    fn rejects_other_lengths() {
        for len in [0, 15, 17, 24, 31, 33, 64] {
            let err = EncryptionKey::from_bytes(&vec![0u8; len]).unwrap_err();
            assert!(matches!(err, CipherError::InvalidKeyLength(n) if n == len));
        }
    }

    #[test]
    fn key_is_zeroized_on_drop() {
        fn assert_zeroize_on_drop<T: ZeroizeOnDrop>() {}
        assert_zeroize_on_drop::<EncryptionKey>();

        let mut key = EncryptionKey::from_bytes(&[0xAAu8; 32]).unwrap();
        key.zeroize();
        assert!(key.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn key_redacted_in_debug() {
        let key = EncryptionKey::from_bytes(b"0123456789abcdef").unwrap();
        let printed = format!("{key:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("0123456789abcdef"));
    }
}
