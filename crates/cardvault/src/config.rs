//! Configuration loading and validation for the cardvault service.
//!
//! All values are read from environment variables at startup (a `.env` file in
//! the working directory is loaded first, if present). The process exits with a
//! clear error message if any required variable is missing or invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::crypto::key::{AES128_KEY_LEN, AES256_KEY_LEN};
use crate::crypto::EncryptionKey;
use crate::server::middleware::{Limits, MAX_UPLOAD_BYTES, REQUEST_TIMEOUT};

/// Validated service configuration.
#[derive(Deserialize)]
pub struct Config {
    /// Raw symmetric key, 16 or 32 bytes. **Required.**
    ///
    /// Emptied by [`Config::take_encryption_key`].
    pub encryption_key: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// OTLP collector endpoint. Span export is disabled when unset or empty.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Path or name of the `tesseract` executable.
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,

    /// Tesseract language pack passed with `-l`.
    #[serde(default = "default_tesseract_lang")]
    pub tesseract_lang: String,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}
fn default_tesseract_path() -> String {
    "tesseract".into()
}
fn default_tesseract_lang() -> String {
    "eng".into()
}
fn default_max_upload_bytes() -> usize {
    MAX_UPLOAD_BYTES
}
fn default_request_timeout() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        let key_len = self.encryption_key.len();
        if key_len != AES128_KEY_LEN && key_len != AES256_KEY_LEN {
            // Report the length only; the value itself must never be echoed.
            anyhow::bail!(
                "ENCRYPTION_KEY must be {AES128_KEY_LEN} or {AES256_KEY_LEN} bytes, got {key_len}"
            );
        }
        ensure_non_empty(&self.tesseract_path, "TESSERACT_PATH")?;
        ensure_non_empty(&self.tesseract_lang, "TESSERACT_LANG")?;

        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be > 0");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }

    /// Build the process-wide [`EncryptionKey`] from `ENCRYPTION_KEY`.
    ///
    /// The raw string is moved out of the config and zeroized, so the key
    /// lives only inside the returned [`EncryptionKey`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key has an unsupported length or was already taken.
    pub fn take_encryption_key(&mut self) -> Result<EncryptionKey> {
        let raw = Zeroizing::new(std::mem::take(&mut self.encryption_key));
        EncryptionKey::from_bytes(raw.as_bytes()).context("ENCRYPTION_KEY is not a usable AES key")
    }

    /// The OTLP endpoint, treating an empty value as unset.
    pub fn otlp_endpoint(&self) -> Option<&str> {
        self.otel_exporter_otlp_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Request limits applied by the router.
    pub fn limits(&self) -> Limits {
        Limits {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("encryption_key", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .field("tesseract_path", &self.tesseract_path)
            .field("tesseract_lang", &self.tesseract_lang)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            encryption_key: "0123456789abcdef0123456789abcdef".into(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
            otel_exporter_otlp_endpoint: None,
            tesseract_path: default_tesseract_path(),
            tesseract_lang: default_tesseract_lang(),
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_tesseract_path(), "tesseract");
        assert_eq!(default_tesseract_lang(), "eng");
        assert_eq!(default_max_upload_bytes(), 10 * 1024 * 1024);
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(valid_config().limits(), Limits::default());
    }

    #[test]
    fn validate_accepts_both_key_sizes() {
        let mut cfg = valid_config();
        assert!(cfg.validate().is_ok());
        cfg.encryption_key = "0123456789abcdef".into();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.take_encryption_key().unwrap().bits(), 128);
    }

    #[test]
    fn taking_the_key_clears_it_from_config() {
        let mut cfg = valid_config();
        assert_eq!(cfg.take_encryption_key().unwrap().bits(), 256);
        assert!(cfg.encryption_key.is_empty());
        assert!(cfg.take_encryption_key().is_err());
    }

    #[test]
    fn validate_rejects_bad_key_length_without_echoing_it() {
        let mut cfg = valid_config();
        cfg.encryption_key = "too-short-secret".repeat(3);
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("got 48"));
        assert!(!err.contains("too-short-secret"));
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut cfg = valid_config();
        cfg.max_upload_bytes = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = valid_config();
        cfg.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_tesseract_lang() {
        let mut cfg = valid_config();
        cfg.tesseract_lang = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_otlp_endpoint_is_disabled() {
        let mut cfg = valid_config();
        assert_eq!(cfg.otlp_endpoint(), None);
        cfg.otel_exporter_otlp_endpoint = Some("   ".into());
        assert_eq!(cfg.otlp_endpoint(), None);
        cfg.otel_exporter_otlp_endpoint = Some("http://collector:4317".into());
        assert_eq!(cfg.otlp_endpoint(), Some("http://collector:4317"));
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = valid_config();
        let printed = format!("{cfg:?}");
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains("0123456789abcdef"));
    }

    #[test]
    fn limits_follow_config() {
        let limits = valid_config().limits();
        assert_eq!(limits.request_timeout, Duration::from_secs(30));
        assert_eq!(limits.max_upload_bytes, 10 * 1024 * 1024);
    }
}
