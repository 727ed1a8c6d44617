//! Free-text normalization for movie titles and descriptions.
//!
//! The normalizer is a fixed [`PipelineAnalyzer`]:
//!
//! 1. lower-case the text
//! 2. NFKD-decompose and drop non-ASCII characters
//! 3. turn hyphens into spaces, then delete everything that is not a word
//!    character or whitespace
//! 4. split on whitespace
//! 5. drop English stop words
//! 6. spell out digit-only tokens
//! 7. optionally tag and lemmatize every token
//!
//! The surviving tokens are joined with single spaces.
//!
//! # Examples
//!
//! ```
//! use reeltag::analysis::normalizer::{Normalizer, NormalizerConfig};
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default()).unwrap();
//! let text = normalizer.normalize("The 2 Towers: Frodo's journey").unwrap();
//! assert_eq!(text, "two towers frodos journey");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::{PipelineAnalyzer, StageKind};
use crate::analysis::char_filter::ascii_fold::AsciiFoldingCharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::Token;
use crate::analysis::token_filter::lemma::LemmatizeFilter;
use crate::analysis::token_filter::number::NumberToWordsFilter;
use crate::analysis::token_filter::pos_tag::PosTagFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::analysis::tokenizer::{Tokenizer, TokenizerKind};
use crate::error::Result;

/// Settings for the text normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Reduce tokens to their dictionary form (step 7).
    pub lemmatize: bool,
    /// Tokenizer used in step 4.
    pub tokenizer: TokenizerKind,
}

/// The named steps of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NormalizationStep {
    Lowercase,
    Ascii,
    RemoveSpecials,
    Tokenize,
    StopWords,
    NumbersToWords,
    Lemmatize,
}

impl NormalizationStep {
    pub fn label(&self) -> &'static str {
        match self {
            NormalizationStep::Lowercase => "1. to lowercase",
            NormalizationStep::Ascii => "2. to ASCII",
            NormalizationStep::RemoveSpecials => "3. remove special chars",
            NormalizationStep::Tokenize => "4. tokenization",
            NormalizationStep::StopWords => "5. stop words",
            NormalizationStep::NumbersToWords => "6. numbers to words",
            NormalizationStep::Lemmatize => "7. lemmatisation",
        }
    }

    fn from_stage(kind: StageKind, name: &str) -> Option<Self> {
        match (kind, name) {
            (StageKind::CharFilter, "lowercase") => Some(NormalizationStep::Lowercase),
            (StageKind::CharFilter, "ascii_folding") => Some(NormalizationStep::Ascii),
            (StageKind::CharFilter, "pattern_replace") => Some(NormalizationStep::RemoveSpecials),
            (StageKind::Tokenizer, _) => Some(NormalizationStep::Tokenize),
            (StageKind::Filter, "stop") => Some(NormalizationStep::StopWords),
            (StageKind::Filter, "number_to_words") => Some(NormalizationStep::NumbersToWords),
            (StageKind::Filter, "pos_tag" | "lemmatize") => Some(NormalizationStep::Lemmatize),
            _ => None,
        }
    }
}

impl fmt::Display for NormalizationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Time spent in each normalization step, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTimings {
    pub steps: Vec<(NormalizationStep, Duration)>,
}

impl StepTimings {
    fn record(&mut self, step: NormalizationStep, elapsed: Duration) {
        match self.steps.last_mut() {
            Some((last, total)) if *last == step => *total += elapsed,
            _ => self.steps.push((step, elapsed)),
        }
    }

    /// Total time across all steps.
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }
}

/// Deterministic text normalizer.
#[derive(Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    analyzer: PipelineAnalyzer,
}

impl Normalizer {
    /// Build the normalization pipeline for the given settings.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let tokenizer: Arc<dyn Tokenizer> = match config.tokenizer {
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
        };

        let mut analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(AsciiFoldingCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::hyphens_to_spaces()?))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_specials()?))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(NumberToWordsFilter::new()))
            .with_name("movie_text");

        if config.lemmatize {
            analyzer = analyzer
                .add_filter(Arc::new(PosTagFilter::new()))
                .add_filter(Arc::new(LemmatizeFilter::new()));
        }

        Ok(Normalizer { config, analyzer })
    }

    /// The settings this normalizer was built with.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize raw text into space-joined tokens.
    pub fn normalize(&self, text: &str) -> Result<String> {
        let tokens: Vec<Token> = self.analyzer.analyze(text)?.collect();
        Ok(join_tokens(&tokens))
    }

    /// Normalize raw text and report the time spent in each step.
    pub fn normalize_with_timings(&self, text: &str) -> Result<(String, StepTimings)> {
        let (tokens, stages) = self.analyzer.analyze_timed(text)?;

        let mut timings = StepTimings::default();
        for stage in stages {
            if let Some(step) = NormalizationStep::from_stage(stage.kind, stage.name) {
                timings.record(step, stage.elapsed);
            }
        }

        Ok((join_tokens(&tokens), timings))
    }

    /// Normalize a title/description pair the way examples are prepared for
    /// training: the lower-cased title followed by the description.
    pub fn normalize_example(&self, title: &str, description: &str) -> Result<String> {
        self.normalize(&example_text(title, description))
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("config", &self.config)
            .field("analyzer", &self.analyzer)
            .finish()
    }
}

/// Concatenate the lower-cased title and the description.
///
/// The two are joined with a single space, the same text that
/// [`Normalizer::normalize_example`] builds for training.
pub fn example_text(title: &str, description: &str) -> String {
    format!("{} {}", title.to_lowercase(), description)
}

fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
