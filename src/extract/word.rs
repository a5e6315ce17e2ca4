// DOCX extractor: a .docx file is a zip container whose main body
// lives in word/document.xml. We stream the XML and keep text runs,
// inserting a newline at each paragraph close so paragraph boundaries
// survive into the extracted text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::traits::{DocumentExtractor, Extraction};

pub struct WordExtractor;

impl DocumentExtractor for WordExtractor {
    fn kind(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, path: &Path) -> Extraction {
        match extract_docx(path) {
            Ok(text) => Extraction::Text(text),
            Err(reason) => Extraction::Unreadable { reason },
        }
    }
}

fn extract_docx(path: &Path) -> Result<String, String> {
    let file = File::open(path).map_err(|e| format!("open failed: {e}"))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| format!("not a zip container: {e}"))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| format!("missing word/document.xml: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("document.xml read failed: {e}"))?;

    let mut reader = Reader::from_str(&xml);
    let mut out = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(t)) => {
                let piece = t
                    .unescape()
                    .map_err(|e| format!("xml text decode failed: {e}"))?;
                out.push_str(&piece);
            }
            // Paragraph close becomes a line break; tabs become spaces.
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => out.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => out.push(' '),
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("xml parse failed: {e}")),
            _ => {}
        }
    }
    Ok(out)
}
