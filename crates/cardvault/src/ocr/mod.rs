//! Optical character recognition seam.
//!
//! The server only needs "image bytes in, text out". [`TextRecognizer`] is the
//! trait the upload handler calls; [`TesseractCli`] is the production
//! implementation and tests substitute a mock.
//!
//! Recognition is blocking work. Callers run it on the blocking thread pool.

pub mod tesseract;

pub use tesseract::TesseractCli;

use thiserror::Error;

/// Errors produced while turning an image into text.
#[derive(Debug, Error)]
pub enum OcrError {
    /// The OCR binary could not be started (missing, not executable).
    #[error("failed to start OCR engine `{binary}`: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Piping the image in or reading the text out failed.
    #[error("I/O error while talking to the OCR engine: {0}")]
    Io(#[from] std::io::Error),

    /// The engine ran but reported failure.
    #[error("OCR engine exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// The engine produced output that is not UTF-8.
    #[error("OCR engine produced non-UTF-8 output")]
    NonUtf8,
}

/// Turns an uploaded image into recognised text.
#[cfg_attr(test, mockall::automock)]
pub trait TextRecognizer: Send + Sync {
    /// Recognise all text in `image` (encoded PNG or JPEG bytes).
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError>;
}
