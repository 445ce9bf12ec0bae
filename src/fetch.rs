use std::sync::Arc;

use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Turns downloaded document bytes into the plain text the pipeline reads.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError>;
}

/// Reads the text layer of a PDF with `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, AppError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|err| AppError::Pdf(err.to_string()))
    }
}

pub async fn download_pdf(client: &Client, url: &str) -> Result<Vec<u8>, AppError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}

/// Hex SHA-256 of the PDF, used to skip re-extracting an unchanged document.
pub fn pdf_fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Runs the CPU bound extraction off the async runtime. A panicking
/// extractor surfaces as [`AppError::Join`].
pub async fn extract_text_blocking(
    extractor: Arc<dyn TextExtractor>,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable() {
        let a = pdf_fingerprint(b"%PDF-1.4 menu");
        assert_eq!(a, pdf_fingerprint(b"%PDF-1.4 menu"));
        assert_ne!(a, pdf_fingerprint(b"%PDF-1.4 menu v2"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_garbage_is_not_a_pdf() {
        let result = PdfTextExtractor.extract(b"definitely not a pdf");
        assert!(matches!(result, Err(AppError::Pdf(_))));
    }

    struct Panicking;

    impl TextExtractor for Panicking {
        fn extract(&self, _bytes: &[u8]) -> Result<String, AppError> {
            panic!("broken document")
        }
    }

    #[tokio::test]
    async fn test_panicking_extractor_is_an_error() {
        let result = extract_text_blocking(Arc::new(Panicking), Vec::new()).await;
        assert!(matches!(result, Err(AppError::Join(_))));
    }
}
