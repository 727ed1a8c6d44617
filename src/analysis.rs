//! Text analysis: char filters, tokenizers, token filters and the analyzers
//! that chain them, plus the movie-text [`normalizer`] built from them.

pub mod analyzer;
pub mod char_filter;
pub mod english;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
