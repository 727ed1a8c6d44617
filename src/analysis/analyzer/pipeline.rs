//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! Processing order:
//! 1. Char filters, in the order they were added
//! 2. Tokenizer
//! 3. Token filters, in the order they were added
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use reeltag::analysis::analyzer::Analyzer;
//! use reeltag::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use reeltag::analysis::char_filter::lowercase::LowercaseCharFilter;
//! use reeltag::analysis::token_filter::stop::StopFilter;
//! use reeltag::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_char_filter(Arc::new(LowercaseCharFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])))
//!     .with_name("custom");
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Which part of the pipeline a stage belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    CharFilter,
    Tokenizer,
    Filter,
}

/// Wall-clock time spent in one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTiming {
    pub kind: StageKind,
    pub name: &'static str,
    pub elapsed: Duration,
}

/// A configurable analyzer that combines a tokenizer with chains of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Run the pipeline stage by stage, materializing the tokens after each
    /// stage and recording how long it took.
    pub fn analyze_timed(&self, text: &str) -> Result<(Vec<Token>, Vec<StageTiming>)> {
        let mut timings =
            Vec::with_capacity(self.char_filters.len() + self.filters.len() + 1);

        let mut filtered_text = text.to_string();
        for char_filter in &self.char_filters {
            let started = Instant::now();
            filtered_text = char_filter.filter(&filtered_text);
            timings.push(StageTiming {
                kind: StageKind::CharFilter,
                name: char_filter.name(),
                elapsed: started.elapsed(),
            });
        }

        let started = Instant::now();
        let mut tokens: Vec<Token> = self.tokenizer.tokenize(&filtered_text)?.collect();
        timings.push(StageTiming {
            kind: StageKind::Tokenizer,
            name: self.tokenizer.name(),
            elapsed: started.elapsed(),
        });

        for filter in &self.filters {
            let started = Instant::now();
            tokens = filter.filter(Box::new(tokens.into_iter()))?.collect();
            timings.push(StageTiming {
                kind: StageKind::Filter,
                name: filter.name(),
                elapsed: started.elapsed(),
            });
        }

        Ok((tokens, timings))
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let filtered_text = self
            .char_filters
            .iter()
            .fold(text.to_string(), |acc, char_filter| char_filter.filter(&acc));

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;
        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
