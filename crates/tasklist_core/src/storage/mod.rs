//! Flat-file storage for task records.
//!
//! # Responsibility
//! - Encode/decode one task per `|`-delimited line.
//! - Read the backing file whole and rewrite it whole.
//!
//! # Invariants
//! - A missing backing file is not an error; it reads as "no file".
//! - Writes replace the file atomically (temp file + rename).
//! - A non-integer id aborts the whole read; malformed field counts do not.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod file;
pub mod record;

pub use file::{read_task_file, write_task_file};
pub use record::{format_records, parse_records, ParsedRecords};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    Read { path: PathBuf, source: io::Error },
    /// The backing file could not be written or replaced.
    Write { path: PathBuf, source: io::Error },
    /// A well-formed record carries an id that is not a base-10 integer.
    InvalidId { line: usize, value: String },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read task file `{}`: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write task file `{}`: {source}", path.display())
            }
            Self::InvalidId { line, value } => {
                write!(f, "invalid task id `{value}` on line {line}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::InvalidId { .. } => None,
        }
    }
}
