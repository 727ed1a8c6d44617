//! Lemmatization filter.
//!
//! Uses the tag left by [`PosTagFilter`](super::pos_tag::PosTagFilter) when
//! present; untagged tokens are lemmatized as nouns.

use crate::analysis::english::lemmatizer::Lemmatizer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Reduces every token to its dictionary form.
#[derive(Clone, Debug, Default)]
pub struct LemmatizeFilter {
    lemmatizer: Lemmatizer,
}

impl LemmatizeFilter {
    pub fn new() -> Self {
        LemmatizeFilter {
            lemmatizer: Lemmatizer::new(),
        }
    }
}

impl Filter for LemmatizeFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let lemmatizer = self.lemmatizer;
        Ok(Box::new(tokens.map(move |token| {
            let lemma = lemmatizer.lemmatize(&token.text, token.pos.unwrap_or_default());
            token.with_text(lemma)
        })))
    }

    fn name(&self) -> &'static str {
        "lemmatize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::pos_tag::PosTagFilter;

    #[test]
    fn test_tagged_lemmatization() {
        let words = ["cooking", "went", "was", "has", "studies", "going"];
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();

        let tagged = PosTagFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap();
        let lemmas: Vec<String> = LemmatizeFilter::new()
            .filter(tagged)
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(lemmas, vec!["cook", "go", "be", "have", "study", "go"]);
    }

    #[test]
    fn test_untagged_tokens_are_nouns() {
        let tokens = vec![Token::new("spies", 0), Token::new("cooking", 1)];
        let lemmas: Vec<String> = LemmatizeFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(lemmas, vec!["spy", "cooking"]);
    }
}
