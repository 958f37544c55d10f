//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailure`] → 400
/// - [`ServiceError::PayloadTooLarge`] → 413
/// - [`ServiceError::NoCardNumber`] → 422
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Recognition`] → 500
/// - [`ServiceError::Internal`] → 500
///
/// Messages must never carry card digits or key material.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: a missing field or an unreadable body.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// The recognised text contained no card number in any supported layout.
    #[error("no card number found in the uploaded image")]
    NoCardNumber,

    /// Encryption failed due to a crypto-layer error.
    #[error("encryption failed")]
    EncryptionFailure,

    /// The ciphertext was malformed, tampered with, or sealed under another key.
    ///
    /// Deliberately carries no detail so callers cannot tell which check failed.
    #[error("decryption failed")]
    DecryptionFailure,

    /// The OCR engine could not turn the upload into text.
    #[error("text recognition failed")]
    Recognition,

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailure => 400,
            ServiceError::PayloadTooLarge => 413,
            ServiceError::NoCardNumber => 422,
            ServiceError::EncryptionFailure => 500,
            ServiceError::Recognition => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code placed in the error response body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::DecryptionFailure => "decryption_failed",
            ServiceError::PayloadTooLarge => "payload_too_large",
            ServiceError::NoCardNumber => "no_card_number",
            ServiceError::EncryptionFailure => "encryption_failed",
            ServiceError::Recognition => "recognition_failed",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::DecryptionFailure.http_status(), 400);
        assert_eq!(ServiceError::PayloadTooLarge.http_status(), 413);
        assert_eq!(ServiceError::NoCardNumber.http_status(), 422);
        assert_eq!(ServiceError::EncryptionFailure.http_status(), 500);
        assert_eq!(ServiceError::Recognition.http_status(), 500);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("no image uploaded".into());
        assert!(e.to_string().contains("no image uploaded"));
    }

    #[test]
    fn decryption_failure_is_opaque() {
        assert_eq!(ServiceError::DecryptionFailure.to_string(), "decryption failed");
        assert_eq!(ServiceError::DecryptionFailure.code(), "decryption_failed");
    }

    #[test]
    fn payload_too_large_has_its_own_code() {
        assert_eq!(ServiceError::PayloadTooLarge.code(), "payload_too_large");
    }
}
