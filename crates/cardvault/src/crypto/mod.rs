//! AES-GCM-SIV card number encryption primitives.
//!
//! This module is intentionally free of HTTP and OCR dependencies.
//!
//! # Ciphertext format
//!
//! ```text
//! base64(nonce[12] || ciphertext || tag[16])
//! ```

pub mod cipher;
pub mod key;

pub use cipher::{decrypt, encrypt};
pub use key::EncryptionKey;
