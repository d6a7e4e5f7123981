use super::{ExtractionError, TextExtractor};

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; page texts are
/// concatenated in document order.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, document_bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = pdf_extract::extract_text_from_mem(document_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(text)
    }
}
