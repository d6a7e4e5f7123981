//! Document text extraction. Deterministic and offline; a failure here is
//! terminal for the request, with no retry.

pub mod pdf;

pub use pdf::PdfTextExtractor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The concatenated text is blank or whitespace-only. A scanned image
    /// with no text layer is indistinguishable from an empty document and
    /// must be rejected, not passed to the model.
    #[error("document is empty or has no extractable text layer")]
    EmptyDocument,

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),
}

/// Converts a binary document payload into plain text, reading all pages in
/// document order.
pub trait TextExtractor {
    fn extract(&self, document_bytes: &[u8]) -> Result<String, ExtractionError>;
}
