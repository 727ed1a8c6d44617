//! Machine learning building blocks for genre tagging.
//!
//! Sparse TF-IDF features, multi-label binarization, per-label binary
//! estimators and the evaluation helpers used by [`crate::model`].

pub mod binarizer;
pub mod estimator;
pub mod metrics;
pub mod sparse;
pub mod split;
pub mod vectorizer;
