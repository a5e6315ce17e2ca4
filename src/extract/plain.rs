// Plain-text extractor: reads the file as UTF-8, replacing invalid
// byte sequences rather than rejecting the whole file. Submissions come
// from many editors and platforms; a stray Latin-1 byte shouldn't cost
// a document its place in the corpus.

use std::fs;
use std::path::Path;

use super::traits::{DocumentExtractor, Extraction};

pub struct PlainTextExtractor;

impl DocumentExtractor for PlainTextExtractor {
    fn kind(&self) -> &'static str {
        "plain text"
    }

    fn extract(&self, path: &Path) -> Extraction {
        match fs::read(path) {
            Ok(bytes) => Extraction::Text(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => Extraction::Unreadable {
                reason: format!("read failed: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_utf8_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello submission").unwrap();
        let out = PlainTextExtractor.extract(file.path());
        assert_eq!(out, Extraction::Text("hello submission".to_string()));
    }

    #[test]
    fn tolerates_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"abc\xff\xfedef").unwrap();
        let out = PlainTextExtractor.extract(file.path());
        let text = out.text().unwrap().to_string();
        assert!(text.starts_with("abc"));
        assert!(text.ends_with("def"));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let out = PlainTextExtractor.extract(Path::new("/nonexistent/file.txt"));
        assert!(matches!(out, Extraction::Unreadable { .. }));
    }
}
