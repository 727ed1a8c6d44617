//! Movie datasets on disk.
//!
//! [`prepare`] cleans the raw metadata export into a training file and
//! [`corpus`] loads that file as normalized texts with genre label sets.

pub mod corpus;
pub mod prepare;

use csv::StringRecord;

use crate::error::{ReeltagError, Result};

/// Position of a required column in a CSV header (case-insensitive).
pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ReeltagError::invalid_input(format!("missing required column '{name}'")))
}

/// Field at `index`, with empty cells reported as `None`.
pub(crate) fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record.get(index).filter(|value| !value.is_empty())
}
