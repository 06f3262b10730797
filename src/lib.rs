//! Synthetic teaching datasets: a comment line, then rows of an index plus random integers.
//!
//! - Writer: plain text for any filename; gzip/zstd only when asked for.
//! - Inspector: reads a generated file back and reports its shape.
//!
//! Data shape:
//! - Optional first line `{comment_char} {header} `
//! - Rows `{index}{delimiter}{v1}...{delimiter}{vN}`, each `v` uniform in `0..=100`
#![cfg_attr(docsrs, feature(doc_cfg))]
//
pub mod cli;
mod inspect;
mod io;
mod writer;

pub use crate::inspect::{inspect_dataset, InspectSummary};
pub use crate::io::{
    reader_from_path, reader_with_compression, writer_to_path, Compression, OutputMeta,
};
pub use crate::writer::{create_dataset, write_dataset, DatasetSummary};

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_NROWS: u64 = 10;
pub const DEFAULT_NCOLS: u64 = 10;
pub const DEFAULT_FILENAME: &str = "basics_dataset.txt";
pub const DEFAULT_DELIMITER: &str = ",";
pub const DEFAULT_HEADER: &str = "Sample Dataset";
pub const DEFAULT_COMMENT_CHAR: &str = "#";

/// Inclusive upper bound of every generated value (lower bound is 0).
pub const MAX_VALUE: u32 = 100;

/// What to generate and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    pub nrows: u64,
    pub ncols: u64,
    pub filename: PathBuf,
    pub delimiter: String,
    /// `None` or an empty string suppresses the comment line.
    pub header: Option<String>,
    pub comment_char: String,
    /// Byte wrapping for the output; the filename is never consulted.
    pub compression: Compression,
}

impl DatasetSpec {
    /// The header text to write, if any.
    pub fn header_line(&self) -> Option<&str> {
        self.header.as_deref().filter(|h| !h.is_empty())
    }
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self {
            nrows: DEFAULT_NROWS,
            ncols: DEFAULT_NCOLS,
            filename: PathBuf::from(DEFAULT_FILENAME),
            delimiter: DEFAULT_DELIMITER.to_string(),
            header: Some(DEFAULT_HEADER.to_string()),
            comment_char: DEFAULT_COMMENT_CHAR.to_string(),
            compression: Compression::None,
        }
    }
}

/// Error type returned by this crate when not using `anyhow`.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{what} must be a single byte to read back, got {value:?}")]
    NotSingleByte { what: &'static str, value: String },
    #[error("line {line}: expected an integer field, got {value:?}")]
    UnexpectedField { line: u64, value: String },
    #[error("formatting a row failed")]
    Format(#[from] std::fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv_async::Error),
}

pub type DatasetResult<T> = std::result::Result<T, DatasetError>;
