// Text normalization: the cleanup pass every document goes through
// before embedding.
//
// Submissions carry administrative boilerplate (registration numbers,
// roll numbers, serial/date stamps) that would otherwise dominate the
// similarity signal: two unrelated forms from the same office share all
// of it. Stripping it first means the comparison runs on the actual
// content.

use regex_lite::Regex;

/// Normalizes raw document text for comparison.
///
/// Compile once, reuse across the whole corpus; the patterns are not
/// cheap to build per document.
pub struct Normalizer {
    boilerplate: Regex,
    whitespace: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        // A label (id/roll/reg/registration/date/sl/no) followed by
        // optional separators and digits. Whole-word on both ends so
        // "north 42" or "idle 9to5" survive.
        let boilerplate = Regex::new(r"(?i)\b(id|roll|reg|registration|date|sl|no)[\s:]*\d+\b")
            .expect("boilerplate pattern is a valid regex");
        let whitespace = Regex::new(r"\s+").expect("whitespace pattern is a valid regex");
        Self {
            boilerplate,
            whitespace,
        }
    }

    /// Strip administrative boilerplate, collapse whitespace runs to
    /// single spaces, trim, and lowercase.
    ///
    /// Empty input yields empty output. Callers must exclude documents
    /// whose normalized text is empty; there is nothing left to embed
    /// or compare.
    pub fn normalize(&self, text: &str) -> String {
        let stripped = self.boilerplate.replace_all(text, "");
        let collapsed = self.whitespace.replace_all(&stripped, " ");
        collapsed.trim().to_lowercase()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
