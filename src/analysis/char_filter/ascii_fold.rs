use unicode_normalization::UnicodeNormalization;

use super::CharFilter;

/// A char filter that applies NFKD decomposition and then drops every
/// character outside the ASCII range.
///
/// Accented letters decompose into a base letter plus combining marks, so the
/// base letter survives and the marks are dropped. Symbols with no ASCII
/// decomposition disappear entirely.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingCharFilter;

impl AsciiFoldingCharFilter {
    pub fn new() -> Self {
        AsciiFoldingCharFilter
    }
}

impl CharFilter for AsciiFoldingCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            return input.to_string();
        }
        input.nfkd().filter(char::is_ascii).collect()
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}
