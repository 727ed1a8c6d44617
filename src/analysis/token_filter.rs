//! Token filters that transform the token stream produced by a tokenizer.
//!
//! - [`stop::StopFilter`] - Removes stop words
//! - [`number::NumberToWordsFilter`] - Spells out digit tokens
//! - [`pos_tag::PosTagFilter`] - Attaches coarse part-of-speech tags
//! - [`lemma::LemmatizeFilter`] - Reduces tokens to their dictionary form
//!
//! Filters are chained by an analyzer:
//!
//! ```text
//! Tokenizer → Stop Words → Numbers → POS Tags → Lemmas
//! ```

pub mod lemma;
pub mod number;
pub mod pos_tag;
pub mod stop;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// ```
/// use reeltag::analysis::token::{Token, TokenStream};
/// use reeltag::analysis::token_filter::Filter;
/// use reeltag::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|t| {
///             let reversed: String = t.text.chars().rev().collect();
///             t.with_text(reversed)
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter.
    fn name(&self) -> &'static str;
}
