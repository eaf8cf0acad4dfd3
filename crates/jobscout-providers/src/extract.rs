//! Plain-text extractor.
//!
//! Handles UTF-8 text formats; anything else is an extraction error carrying
//! the declared format so the caller can report what was rejected. Binary
//! document formats (PDF, DOCX) belong to a dedicated extraction service
//! behind the same trait.

use jobscout_core::error::{JobscoutError, Result};
use jobscout_core::traits::TextExtractor;

pub struct PlainTextExtractor;

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

fn normalize_format(declared_format: &str) -> String {
    // Accept a bare extension, a filename, or a mime type (with or
    // without parameters like "; charset=utf-8").
    let lower = declared_format.to_lowercase();
    let bare = lower.split(';').next().unwrap_or(&lower).trim();
    if bare.contains('/') {
        bare.to_string()
    } else {
        bare.rsplit('.').next().unwrap_or(bare).to_string()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], declared_format: &str) -> Result<String> {
        let format = normalize_format(declared_format);
        match format.as_str() {
            "txt" | "md" | "text" | "text/plain" | "text/markdown" => {
                String::from_utf8(bytes.to_vec()).map_err(|_| {
                    JobscoutError::Extraction(format!(
                        "'{declared_format}' content is not valid UTF-8"
                    ))
                })
            }
            other => Err(JobscoutError::Extraction(format!(
                "unsupported format '{other}': only plain text (.txt, .md) is supported"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_txt_and_md() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.extract(b"hello", "cv.txt").unwrap(), "hello");
        assert_eq!(extractor.extract(b"# CV", "resume.md").unwrap(), "# CV");
        assert_eq!(extractor.extract(b"plain", "txt").unwrap(), "plain");
    }

    #[test]
    fn test_extracts_mime_types_with_parameters() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(
            extractor.extract(b"hello", "text/plain; charset=utf-8").unwrap(),
            "hello"
        );
        assert_eq!(extractor.extract(b"# CV", "text/markdown").unwrap(), "# CV");
    }

    #[test]
    fn test_rejects_unsupported_formats() {
        let extractor = PlainTextExtractor::new();
        let err = extractor.extract(b"%PDF-1.4", "cv.pdf").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pdf"));
        assert!(matches!(err, JobscoutError::Extraction(_)));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let extractor = PlainTextExtractor::new();
        let err = extractor.extract(&[0xff, 0xfe, 0x00], "cv.txt").unwrap_err();
        assert!(matches!(err, JobscoutError::Extraction(_)));
    }
}
