// PDF extractor: pulls the embedded text layer out of a PDF.
//
// Scanned (image-only) PDFs have no text layer and come out empty; OCR
// is out of scope, so those documents fall below the corpus builder's
// minimum-content rule and get excluded there with a visible log line.

use std::panic;
use std::path::Path;

use super::traits::{DocumentExtractor, Extraction};

pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn kind(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, path: &Path) -> Extraction {
        // pdf-extract can panic on pathological files; the trait
        // contract says nothing escapes this boundary, so catch it.
        let result = panic::catch_unwind(|| pdf_extract::extract_text(path));
        match result {
            Ok(Ok(text)) => Extraction::Text(text),
            Ok(Err(e)) => Extraction::Unreadable {
                reason: format!("pdf parse failed: {e}"),
            },
            Err(_) => Extraction::Unreadable {
                reason: "pdf parser panicked".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn corrupt_pdf_is_unreadable_not_a_panic() {
        let mut file = tempfile::Builder::new()
            .suffix(".pdf")
            .tempfile()
            .unwrap();
        file.write_all(b"%PDF-1.4 this is not a real pdf body").unwrap();
        let out = PdfExtractor.extract(file.path());
        assert!(matches!(out, Extraction::Unreadable { .. }));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let out = PdfExtractor.extract(Path::new("/nonexistent/file.pdf"));
        assert!(matches!(out, Extraction::Unreadable { .. }));
    }
}
