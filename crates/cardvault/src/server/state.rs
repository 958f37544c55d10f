//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::crypto::EncryptionKey;
use crate::ocr::TextRecognizer;

/// Application state shared across all request handlers.
///
/// Both fields are `Arc`-wrapped so that Axum can clone the state for each
/// request without copying key material. Nothing here is mutable.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide key, loaded once at startup.
    pub key: Arc<EncryptionKey>,
    /// OCR engine used by `POST /upload`.
    pub recognizer: Arc<dyn TextRecognizer>,
}

impl AppState {
    /// Create a new [`AppState`] owning `key` and `recognizer`.
    pub fn new(key: EncryptionKey, recognizer: impl TextRecognizer + 'static) -> Self {
        Self {
            key: Arc::new(key),
            recognizer: Arc::new(recognizer),
        }
    }
}
