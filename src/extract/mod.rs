// Text extraction: trait-based abstraction over document containers.
//
// The DocumentExtractor trait defines the interface. One implementation
// per supported container: plain text, PDF, and DOCX. Extraction never
// fails loudly: a file the extractor cannot read produces an explicit
// Unreadable outcome, and the corpus builder decides what to do with it
// (log and exclude). This keeps parse failures visible at the boundary
// instead of silently coercing them to empty strings.

pub mod traits;
pub mod plain;
pub mod pdf;
pub mod word;

use std::path::Path;

use self::traits::DocumentExtractor;

/// Pick the extractor for a path based on its (lowercased) extension.
///
/// Returns None for unsupported extensions; the caller skips those
/// files entirely rather than treating them as unreadable.
pub fn extractor_for(path: &Path) -> Option<&'static dyn DocumentExtractor> {
    static PLAIN: plain::PlainTextExtractor = plain::PlainTextExtractor;
    static PDF: pdf::PdfExtractor = pdf::PdfExtractor;
    static WORD: word::WordExtractor = word::WordExtractor;

    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "txt" => Some(&PLAIN),
        "pdf" => Some(&PDF),
        "docx" => Some(&WORD),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_by_extension() {
        assert_eq!(
            extractor_for(Path::new("a.txt")).map(|e| e.kind()),
            Some("plain text")
        );
        assert_eq!(
            extractor_for(Path::new("b.PDF")).map(|e| e.kind()),
            Some("pdf")
        );
        assert_eq!(
            extractor_for(Path::new("c.docx")).map(|e| e.kind()),
            Some("docx")
        );
    }

    #[test]
    fn unsupported_extensions_are_skipped() {
        assert!(extractor_for(Path::new("image.png")).is_none());
        assert!(extractor_for(Path::new("noextension")).is_none());
    }
}
