//! English linguistic resources: number spelling, part-of-speech tagging and
//! lemmatization.
//!
//! All tables are process-wide statics built on first use and never mutated.

pub mod lemmatizer;
pub mod numerals;
pub mod tagger;
