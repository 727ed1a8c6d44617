//! Char filters that rewrite the raw text before it is tokenized.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lower-casing
//! - [`ascii_fold::AsciiFoldingCharFilter`] - NFKD decomposition, then drops non-ASCII
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//!
//! # Examples
//!
//! ```
//! use reeltag::analysis::char_filter::CharFilter;
//! use reeltag::analysis::char_filter::ascii_fold::AsciiFoldingCharFilter;
//!
//! let filter = AsciiFoldingCharFilter::new();
//! assert_eq!(filter.filter("Amélie"), "Amelie");
//! ```

pub mod ascii_fold;
pub mod lowercase;
pub mod pattern_replace;

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text, returning the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}
