use regex::Regex;

use super::CharFilter;
use crate::error::{ReeltagError, Result};

/// A char filter that replaces every match of a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern).map_err(|e| {
                ReeltagError::analysis(format!("invalid pattern '{pattern}': {e}"))
            })?,
            replacement: replacement.to_string(),
        })
    }

    /// Replaces hyphens with spaces so hyphenated words split into two tokens.
    pub fn hyphens_to_spaces() -> Result<Self> {
        Self::new("-", " ")
    }

    /// Deletes everything that is neither a word character nor whitespace.
    pub fn strip_specials() -> Result<Self> {
        Self::new(r"[^\w\s]", "")
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_replace() {
        let filter = PatternReplaceCharFilter::new(r"\d+", "NUM").unwrap();
        assert_eq!(filter.filter("Year 2024"), "Year NUM");
    }

    #[test]
    fn test_replacement_is_literal() {
        let filter = PatternReplaceCharFilter::new(r"x", "$1").unwrap();
        assert_eq!(filter.filter("axb"), "a$1b");
    }

    #[test]
    fn test_strip_specials() {
        let filter = PatternReplaceCharFilter::strip_specials().unwrap();
        assert_eq!(
            filter.filter("!)($$&!(^!!!there^$%&^$@there?????}>.,)(&<:[]{"),
            "therethere"
        );
        assert_eq!(filter.filter("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn test_hyphens_to_spaces() {
        let filter = PatternReplaceCharFilter::hyphens_to_spaces().unwrap();
        assert_eq!(filter.filter("spider-man far-from-home"), "spider man far from home");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternReplaceCharFilter::new("(", "");
        assert!(matches!(result, Err(ReeltagError::Analysis(_))));
    }
}
