use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("could not read records from {path:?}, IO error: {source}")]
    Source { path: PathBuf, source: io::Error },
    #[error("could not read or write query stream, IO error: {0}")]
    Stream(#[from] io::Error),
    #[error("record count mismatch, expected {expected} got {actual}")]
    RecordCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single participant record was left out of the index.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum RecordError {
    #[error("invalid line format, expected 5 numbers but found {found}")]
    FieldCount { found: usize },
    #[error("invalid number {field:?} in line")]
    NotAnInteger { field: String },
    #[error("number {value} in line is outside 1..={}", crate::MAX_NUMBER)]
    OutOfRange { value: i64 },
    #[error("line is not valid UTF-8")]
    NotUtf8,
}

/// Why a query line produced no result.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum QueryError {
    #[error("expected 5 numbers but found {found}")]
    FieldCount { found: usize },
    #[error("invalid number {field:?}")]
    NotAnInteger { field: String },
    #[error("number {value} is outside 1..={}", crate::MAX_NUMBER)]
    OutOfRange { value: i64 },
    #[error("number {number} appears more than once")]
    DuplicateNumber { number: u8 },
}
