//! Filesystem output helpers.

pub mod file;
