//! Cleaning of the raw movie metadata export.
//!
//! The raw file must have `release_date`, `title`, `overview` and `genres`
//! columns; any other columns are ignored. Rows are dropped when they are
//! exact duplicates, miss a release date, title or overview, have an
//! overview that is a "not available" placeholder or only whitespace, or
//! carry no genres. Surviving overviews are normalized and genres are
//! written as a comma-joined list.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info};
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::normalizer::Normalizer;
use crate::dataset::{column_index, field};
use crate::error::{ReeltagError, Result, ensure_exists};
use crate::storage::file::write_atomic;

/// One row of the raw export, restricted to the columns we use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawMovie {
    /// 1-based data record number in the source file.
    pub record: usize,
    pub release_date: Option<String>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
}

impl RawMovie {
    fn key(&self) -> (&Option<String>, &Option<String>, &Option<String>, &Option<String>) {
        (&self.release_date, &self.title, &self.overview, &self.genres)
    }
}

/// One row of the cleaned training file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanMovie {
    pub title: String,
    pub overview: String,
    /// Comma-joined genre names.
    pub genres: String,
}

/// Row counts for each cleaning step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrepareReport {
    pub rows_read: usize,
    pub duplicates: usize,
    pub missing_values: usize,
    pub unavailable_overview: usize,
    pub blank_overview: usize,
    pub no_genres: usize,
    pub rows_written: usize,
}

impl fmt::Display for PrepareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows read:               {}", self.rows_read)?;
        writeln!(f, "Duplicates removed:      {}", self.duplicates)?;
        writeln!(f, "Missing values removed:  {}", self.missing_values)?;
        writeln!(f, "Unavailable overviews:   {}", self.unavailable_overview)?;
        writeln!(f, "Blank overviews:         {}", self.blank_overview)?;
        writeln!(f, "Rows without genres:     {}", self.no_genres)?;
        write!(f, "Rows written:            {}", self.rows_written)
    }
}

/// Read the raw export.
pub fn read_raw<R: Read>(reader: R) -> Result<Vec<RawMovie>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let release_date = column_index(&headers, "release_date")?;
    let title = column_index(&headers, "title")?;
    let overview = column_index(&headers, "overview")?;
    let genres = column_index(&headers, "genres")?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let owned = |index: usize| field(&record, index).map(str::to_string);
        rows.push(RawMovie {
            record: rows.len() + 1,
            release_date: owned(release_date),
            title: owned(title),
            overview: owned(overview),
            genres: owned(genres),
        });
    }
    debug!("read {} raw rows", rows.len());
    Ok(rows)
}

/// Parse a genre cell such as `[{'id': 18, 'name': 'Drama'}]`.
///
/// Single quotes are turned into double quotes before JSON parsing; list
/// elements may be objects with a `name` or plain strings.
pub fn parse_genres(cell: &str) -> Result<Vec<String>> {
    let json = cell.replace('\'', "\"");
    let value: Value = serde_json::from_str(&json)
        .map_err(|e| ReeltagError::invalid_input(format!("malformed genres '{cell}': {e}")))?;

    let Value::Array(items) = value else {
        return Err(ReeltagError::invalid_input(format!(
            "genres must be a list, got '{cell}'"
        )));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(name) => Ok(name),
            Value::Object(mut object) => match object.remove("name") {
                Some(Value::String(name)) => Ok(name),
                _ => Err(ReeltagError::invalid_input(format!(
                    "genre without a name in '{cell}'"
                ))),
            },
            other => Err(ReeltagError::invalid_input(format!(
                "unexpected genre element {other} in '{cell}'"
            ))),
        })
        .collect()
}

/// Cleans raw rows into training rows.
pub struct DataPreparer {
    normalizer: Normalizer,
    unavailable: Regex,
}

impl DataPreparer {
    pub fn new(normalizer: Normalizer) -> Result<Self> {
        let unavailable = Regex::new(r"(?i)^(not available|no overview)")
            .map_err(|e| ReeltagError::other(format!("Invalid regex: {e}")))?;
        Ok(DataPreparer {
            normalizer,
            unavailable,
        })
    }

    /// Apply every cleaning step to `rows`.
    pub fn clean(&self, rows: Vec<RawMovie>) -> Result<(Vec<CleanMovie>, PrepareReport)> {
        let mut report = PrepareReport {
            rows_read: rows.len(),
            ..PrepareReport::default()
        };

        let mut seen = HashSet::with_capacity(rows.len());
        let mut unique = Vec::with_capacity(rows.len());
        for row in &rows {
            if seen.insert(row.key()) {
                unique.push(row);
            } else {
                report.duplicates += 1;
            }
        }

        let mut kept: Vec<(&str, &str, Vec<String>)> = Vec::with_capacity(unique.len());
        for row in unique {
            let (Some(_), Some(title), Some(overview)) =
                (&row.release_date, &row.title, &row.overview)
            else {
                report.missing_values += 1;
                continue;
            };
            if self.unavailable.is_match(overview) {
                report.unavailable_overview += 1;
                continue;
            }
            if overview.trim().is_empty() {
                report.blank_overview += 1;
                continue;
            }

            let genres = match row.genres.as_deref().map(str::trim) {
                None | Some("[]") => Vec::new(),
                Some(cell) => parse_genres(cell).map_err(|e| {
                    ReeltagError::invalid_input(format!("record {}: {e}", row.record))
                })?,
            };
            if genres.is_empty() {
                report.no_genres += 1;
                continue;
            }

            kept.push((title.as_str(), overview.as_str(), genres));
        }

        let cleaned = kept
            .into_par_iter()
            .map(|(title, overview, genres)| {
                Ok(CleanMovie {
                    title: title.to_string(),
                    overview: self.normalizer.normalize(overview)?,
                    genres: genres.join(","),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        report.rows_written = cleaned.len();
        Ok((cleaned, report))
    }

    /// Clean the raw export at `input` and write the result to `output`.
    pub fn prepare_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<PrepareReport> {
        let input = input.as_ref();
        ensure_exists(input)?;
        info!("reading raw data from {}", input.display());

        let rows = read_raw(BufReader::new(File::open(input)?))?;
        let (cleaned, report) = self.clean(rows)?;
        write_atomic(output.as_ref(), |file| write_clean(file, &cleaned))?;

        info!(
            "wrote {} of {} rows to {}",
            report.rows_written,
            report.rows_read,
            output.as_ref().display()
        );
        Ok(report)
    }
}

/// Write cleaned rows with a `title,overview,genres` header.
pub fn write_clean<W: Write>(writer: W, rows: &[CleanMovie]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    if rows.is_empty() {
        writer.write_record(["title", "overview", "genres"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
