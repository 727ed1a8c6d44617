//! Number spelling filter.
//!
//! ```
//! use reeltag::analysis::token_filter::Filter;
//! use reeltag::analysis::token_filter::number::NumberToWordsFilter;
//! use reeltag::analysis::token::Token;
//!
//! let filter = NumberToWordsFilter::new();
//! let tokens = vec![Token::new("apollo", 0), Token::new("13", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(result, vec!["apollo", "thirteen"]);
//! ```

use crate::analysis::english::numerals::{is_numeral, number_to_words};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Replaces tokens made only of decimal digits with their English spelling.
///
/// The spelled form may contain spaces ("two thousand and twenty"); it stays a
/// single token and the spaces become token separators once the stream is
/// joined back into text.
#[derive(Clone, Debug, Default)]
pub struct NumberToWordsFilter;

impl NumberToWordsFilter {
    pub fn new() -> Self {
        NumberToWordsFilter
    }
}

impl Filter for NumberToWordsFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if is_numeral(&token.text) {
                let words = number_to_words(&token.text);
                token.with_text(words)
            } else {
                token
            }
        })))
    }

    fn name(&self) -> &'static str {
        "number_to_words"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_spells_digit_tokens() {
        let filter = NumberToWordsFilter::new();
        let tokens = vec![
            Token::new("1", 0),
            Token::new("2020", 1),
            Token::new("r2d2", 2),
            Token::new("9000", 3),
        ];
        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(
            result,
            vec!["one", "two thousand and twenty", "r2d2", "nine thousand"]
        );
    }
}
