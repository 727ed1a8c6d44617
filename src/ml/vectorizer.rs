//! TF-IDF vectorizer for text feature extraction.
//!
//! Terms are word n-grams over tokens made of two or more word characters.
//! The vocabulary is pruned by document frequency, capped by corpus term
//! frequency, and indexed alphabetically. Rows are raw term counts weighted by
//! smoothed inverse document frequency and scaled to unit length.
//!
//! # Examples
//!
//! ```
//! use reeltag::ml::vectorizer::{TfIdfVectorizer, VectorizerConfig};
//!
//! let docs = vec![
//!     "spy thriller".to_string(),
//!     "space opera".to_string(),
//!     "spy comedy".to_string(),
//! ];
//! let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
//! let rows = vectorizer.fit_transform(&docs).unwrap();
//!
//! assert_eq!(rows.len(), 3);
//! assert!(vectorizer.vocabulary_size() > 0);
//! assert!(vectorizer.transform("documentary").unwrap().is_zero());
//! ```

use std::collections::{HashMap, HashSet};

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stop::ENGLISH_STOP_WORDS_SET;
use crate::error::{ReeltagError, Result};
use crate::ml::sparse::SparseVector;

/// Document-frequency bound, either absolute or relative to the corpus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFrequency {
    Count(usize),
    Proportion(f64),
}

impl DocumentFrequency {
    /// The bound expressed as a document count for a corpus of `n_documents`.
    fn resolve(&self, n_documents: usize) -> f64 {
        match *self {
            DocumentFrequency::Count(count) => count as f64,
            DocumentFrequency::Proportion(p) => p * n_documents as f64,
        }
    }

    fn validate(&self, what: &str) -> Result<()> {
        match *self {
            DocumentFrequency::Proportion(p) if !(0.0..=1.0).contains(&p) => Err(
                ReeltagError::configuration(format!("{what} proportion must be in [0, 1], got {p}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Configuration for the TF-IDF vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Smallest and largest n-gram length, inclusive.
    pub ngram_range: (usize, usize),
    /// Terms in fewer documents than this are dropped.
    pub min_df: DocumentFrequency,
    /// Terms in more documents than this are dropped.
    pub max_df: DocumentFrequency,
    /// Keep only the most frequent terms across the corpus.
    pub max_features: Option<usize>,
    /// Remove English stop words before building n-grams.
    pub stop_words: bool,
    /// Lower-case documents before tokenizing.
    pub lowercase: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        VectorizerConfig {
            ngram_range: (1, 3),
            min_df: DocumentFrequency::Proportion(0.00009),
            max_df: DocumentFrequency::Proportion(1.0),
            max_features: Some(20_000),
            stop_words: true,
            lowercase: true,
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ReeltagError::configuration(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }
        if self.max_features == Some(0) {
            return Err(ReeltagError::configuration(
                "max_features must be positive",
            ));
        }
        self.min_df.validate("min_df")?;
        self.max_df.validate("max_df")?;
        Ok(())
    }
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    config: VectorizerConfig,
    /// Term -> column index, alphabetical order.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new(config: VectorizerConfig) -> Self {
        TfIdfVectorizer {
            config,
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Whether `fit` has completed.
    pub fn is_fitted(&self) -> bool {
        !self.idf.is_empty()
    }

    /// Size of the fitted vocabulary, i.e. the feature dimension.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Column index of a term, if it is in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Fitted IDF weight of a term.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|i| self.idf[i])
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(ReeltagError::invalid_input(
                "cannot fit a vectorizer on an empty corpus",
            ));
        }

        let n_documents = documents.len();
        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyze(doc))
            .collect();

        let mut term_frequency: AHashMap<&str, usize> = AHashMap::new();
        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();
        for terms in &analyzed {
            let mut seen: HashSet<&str> = HashSet::with_capacity(terms.len());
            for term in terms {
                *term_frequency.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *document_frequency.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_frequency.is_empty() {
            return Err(ReeltagError::invalid_input(
                "empty vocabulary; the documents contain only stop words or single characters",
            ));
        }

        let min_df = self.config.min_df.resolve(n_documents);
        let max_df = self.config.max_df.resolve(n_documents);
        let mut kept: Vec<(&str, usize)> = term_frequency
            .into_iter()
            .filter(|(term, _)| {
                let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
                df >= min_df && df <= max_df
            })
            .collect();

        if kept.is_empty() {
            return Err(ReeltagError::invalid_input(
                "no terms remain after document-frequency pruning; lower min_df or raise max_df",
            ));
        }

        if let Some(limit) = self.config.max_features {
            if kept.len() > limit {
                kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
                kept.truncate(limit);
            }
        }

        let mut terms: Vec<&str> = kept.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, term) in terms.into_iter().enumerate() {
            let df = document_frequency.get(term).copied().unwrap_or(0);
            // smoothed: ln((1 + n) / (1 + df)) + 1
            idf.push(((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term.to_string(), index);
        }

        debug!(
            "fitted vectorizer on {} documents, vocabulary size {}",
            n_documents,
            idf.len()
        );

        self.vocabulary = vocabulary;
        self.idf = idf;
        self.n_documents = n_documents;
        Ok(())
    }

    /// Transform one document. Terms outside the vocabulary are ignored, so
    /// fully unknown text yields a zero vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        if !self.is_fitted() {
            return Err(ReeltagError::not_fitted(
                "the vectorizer must be fitted before transform",
            ));
        }

        let mut counts: AHashMap<usize, f64> = AHashMap::new();
        for term in self.analyze(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(index, tf)| (index, tf * self.idf[index]))
            .collect();
        let mut vector = SparseVector::from_pairs(self.vocabulary_size(), pairs);
        vector.normalize_l2();
        Ok(vector)
    }

    /// Transform a batch of documents in parallel.
    pub fn transform_batch(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        documents
            .par_iter()
            .map(|doc| self.transform(doc))
            .collect()
    }

    /// Fit on a corpus, then transform it.
    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform_batch(documents)
    }

    /// Split a document into the n-gram terms counted by the vectorizer.
    fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<&str> = word_tokens(&text)
            .filter(|t| !self.config.stop_words || !ENGLISH_STOP_WORDS_SET.contains(*t))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

/// Maximal runs of two or more word characters.
fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|run| run.chars().nth(1).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    fn unigram_config() -> VectorizerConfig {
        VectorizerConfig {
            ngram_range: (1, 1),
            min_df: DocumentFrequency::Count(1),
            stop_words: false,
            ..VectorizerConfig::default()
        }
    }

    #[test]
    fn test_word_tokens() {
        let tokens: Vec<&str> = word_tokens("a spy, 007 and_more x").collect();
        assert_eq!(tokens, vec!["spy", "007", "and_more"]);
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let mut vectorizer = TfIdfVectorizer::new(unigram_config());
        vectorizer
            .fit(&docs(&["zebra apple", "mango apple"]))
            .unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 3);
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("mango"), Some(1));
        assert_eq!(vectorizer.term_index("zebra"), Some(2));
    }

    #[test]
    fn test_smoothed_idf() {
        let mut vectorizer = TfIdfVectorizer::new(unigram_config());
        vectorizer
            .fit(&docs(&["spy film", "spy drama", "war drama"]))
            .unwrap();

        // n = 3; "spy" appears in 2 documents, "film" in 1
        let expected_spy = (4.0f64 / 3.0).ln() + 1.0;
        let expected_film = (4.0f64 / 2.0).ln() + 1.0;
        assert!((vectorizer.idf("spy").unwrap() - expected_spy).abs() < 1e-12);
        assert!((vectorizer.idf("film").unwrap() - expected_film).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        let rows = vectorizer
            .fit_transform(&docs(&[
                "james bond must unmask the mysterious head",
                "a space crew fights an alien",
            ]))
            .unwrap();

        for row in rows {
            assert!((row.l2_norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ngrams_skip_stop_words() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            min_df: DocumentFrequency::Count(1),
            ..VectorizerConfig::default()
        });
        vectorizer.fit(&docs(&["the quick brown fox"])).unwrap();

        assert!(vectorizer.term_index("quick brown fox").is_some());
        assert!(vectorizer.term_index("quick brown").is_some());
        assert!(vectorizer.term_index("the").is_none());
        assert!(vectorizer.term_index("the quick").is_none());
        assert_eq!(vectorizer.vocabulary_size(), 6);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            max_features: Some(2),
            ..unigram_config()
        });
        vectorizer
            .fit(&docs(&["drama drama comedy", "drama horror comedy", "western"]))
            .unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.term_index("drama").is_some());
        assert!(vectorizer.term_index("comedy").is_some());
        assert!(vectorizer.term_index("western").is_none());
    }

    #[test]
    fn test_min_df_pruning() {
        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig {
            min_df: DocumentFrequency::Count(2),
            ..unigram_config()
        });
        vectorizer
            .fit(&docs(&["spy drama", "spy comedy", "war drama"]))
            .unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.term_index("comedy").is_none());

        let mut strict = TfIdfVectorizer::new(VectorizerConfig {
            min_df: DocumentFrequency::Count(10),
            ..unigram_config()
        });
        assert!(matches!(
            strict.fit(&docs(&["spy drama"])),
            Err(ReeltagError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_vocabulary_is_zero() {
        let mut vectorizer = TfIdfVectorizer::new(unigram_config());
        vectorizer.fit(&docs(&["spy drama"])).unwrap();

        let row = vectorizer.transform("documentary about penguins").unwrap();
        assert!(row.is_zero());
        assert_eq!(row.dim(), 2);
    }

    #[test]
    fn test_errors() {
        let vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        assert!(matches!(
            vectorizer.transform("anything"),
            Err(ReeltagError::NotFitted(_))
        ));

        let mut vectorizer = TfIdfVectorizer::new(VectorizerConfig::default());
        assert!(matches!(
            vectorizer.fit(&[]),
            Err(ReeltagError::InvalidInput(_))
        ));
        assert!(matches!(
            vectorizer.fit(&docs(&["the a of", "i"])),
            Err(ReeltagError::InvalidInput(_))
        ));

        let mut bad = TfIdfVectorizer::new(VectorizerConfig {
            ngram_range: (2, 1),
            ..VectorizerConfig::default()
        });
        assert!(matches!(
            bad.fit(&docs(&["spy"])),
            Err(ReeltagError::Configuration(_))
        ));
    }
}
