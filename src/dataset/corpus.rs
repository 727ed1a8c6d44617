//! Training corpus loaded from a cleaned movie file.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::info;
use rayon::prelude::*;

use crate::analysis::normalizer::Normalizer;
use crate::dataset::{column_index, field};
use crate::error::{Result, ensure_exists};
use crate::ml::split::TrainTestSplit;

/// Normalized example texts with their genre label sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub texts: Vec<String>,
    pub labels: Vec<Vec<String>>,
}

impl Corpus {
    /// Load a cleaned `title,overview,genres` file.
    pub fn load<P: AsRef<Path>>(path: P, normalizer: &Normalizer) -> Result<Self> {
        let path = path.as_ref();
        ensure_exists(path)?;
        let corpus = Self::from_reader(BufReader::new(File::open(path)?), normalizer)?;
        info!("loaded {} examples from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Each example text is the lower-cased title followed by the overview,
    /// normalized; labels are the comma-separated genres.
    pub fn from_reader<R: Read>(reader: R, normalizer: &Normalizer) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let title = column_index(&headers, "title")?;
        let overview = column_index(&headers, "overview")?;
        let genres = column_index(&headers, "genres")?;

        let records: Vec<StringRecord> = reader.records().collect::<csv::Result<_>>()?;

        let (texts, labels): (Vec<String>, Vec<Vec<String>>) = records
            .par_iter()
            .map(|record| {
                let text = normalizer.normalize_example(
                    field(record, title).unwrap_or_default(),
                    field(record, overview).unwrap_or_default(),
                )?;
                Ok((text, split_labels(field(record, genres).unwrap_or_default())))
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unzip();

        Ok(Corpus { texts, labels })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Seeded shuffle split into `(train, test)`.
    pub fn split(&self, test_size: f64, seed: u64) -> Result<(Corpus, Corpus)> {
        let split = TrainTestSplit::new(self.len(), test_size, seed)?;
        let part = |indices: &[usize]| Corpus {
            texts: TrainTestSplit::select(&self.texts, indices),
            labels: TrainTestSplit::select(&self.labels, indices),
        };
        Ok((part(&split.train), part(&split.test)))
    }
}

/// Split a comma-joined genre cell, skipping empty entries.
pub fn split_labels(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
