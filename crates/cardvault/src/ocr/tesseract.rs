//! [`TesseractCli`]: OCR by piping the image through the `tesseract` binary.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{OcrError, TextRecognizer};

/// Runs `tesseract stdin stdout -l <lang>` once per image.
///
/// The image never touches the filesystem; it is written to the child's stdin
/// and the recognised text is read from its stdout.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: String,
    lang: String,
}

impl TesseractCli {
    /// Create a recognizer that invokes `binary` with language pack `lang`.
    pub fn new(binary: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            lang: lang.into(),
        }
    }
}

impl TextRecognizer for TesseractCli {
    fn recognize(&self, image: &[u8]) -> Result<String, OcrError> {
        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout", "-l", self.lang.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OcrError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // A write error usually means the engine exited early; its exit status
        // and stderr explain why better than EPIPE does, so check those first.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(image),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        write_result?;

        debug!(
            image_bytes = image.len(),
            text_bytes = output.stdout.len(),
            "OCR completed"
        );
        String::from_utf8(output.stdout).map_err(|_| OcrError::NonUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_spawn_error() {
        let ocr = TesseractCli::new("/nonexistent/cardvault-tesseract", "eng");
        let err = ocr.recognize(b"\x89PNG").unwrap_err();
        assert!(matches!(err, OcrError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/cardvault-tesseract"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failed() {
        let ocr = TesseractCli::new("false", "eng");
        let err = ocr.recognize(b"\x89PNG").unwrap_err();
        assert!(matches!(err, OcrError::Failed { .. }));
    }
}
