//! # Reeltag
//!
//! Multi-label movie genre tagging from a title and a short description.
//!
//! ## Features
//!
//! - Deterministic English text normalization with per-step timings
//! - TF-IDF features over word n-grams
//! - One-vs-rest classification with a probability threshold
//! - Versioned, checksummed model files
//! - Command line tools to prepare data, train and classify
//!
//! ## Example
//!
//! ```no_run
//! use reeltag::model::persistence::load_from_path;
//!
//! let model = load_from_path("models/model.rtag")?;
//! let genres = model.predict_single("GoldenEye", "James Bond must stop a satellite weapon")?;
//! println!("{genres:?}");
//! # Ok::<(), reeltag::error::ReeltagError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod ml;
pub mod model;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::normalizer::{Normalizer, NormalizerConfig};
    pub use crate::error::{ReeltagError, Result};
    pub use crate::ml::metrics::Stats;
    pub use crate::model::persistence::{load_from_path, save_to_path};
    pub use crate::model::{GenreModel, ModelConfig, ModelFamily, build_model};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
