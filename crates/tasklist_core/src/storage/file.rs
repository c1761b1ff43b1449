//! Whole-file read and atomic rewrite of the task file.
//!
//! # Responsibility
//! - Read the task file in one pass and decode it.
//! - Replace the task file atomically with a freshly encoded body.
//!
//! # Invariants
//! - No file handle outlives the call that opened it.
//! - A failed write never leaves a half-written target file.

use super::record::{format_records, parse_records, ParsedRecords};
use super::{StorageError, StorageResult};
use crate::model::task::Task;
use log::{debug, error, info};
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_SUFFIX: &str = ".tmp";

/// Reads and decodes the task file.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Side effects
/// - Emits `task_file_read` logging events with duration and status.
///
/// # Errors
/// - `StorageError::Read` when the file exists but cannot be read as UTF-8.
/// - `StorageError::InvalidId` when any record has a non-integer id.
pub fn read_task_file(path: &Path) -> StorageResult<Option<ParsedRecords>> {
    let started_at = Instant::now();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("event=task_file_read module=storage status=missing");
            return Ok(None);
        }
        Err(err) => {
            error!(
                "event=task_file_read module=storage status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: err,
            });
        }
    };

    match parse_records(&content) {
        Ok(parsed) => {
            info!(
                "event=task_file_read module=storage status=ok duration_ms={} records={} skipped_lines={}",
                started_at.elapsed().as_millis(),
                parsed.tasks.len(),
                parsed.skipped_lines
            );
            Ok(Some(parsed))
        }
        Err(err) => {
            error!(
                "event=task_file_read module=storage status=error duration_ms={} error_code=invalid_record error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Encodes all tasks and atomically replaces the task file.
///
/// Missing parent directories are created first.
///
/// # Side effects
/// - Writes `<file>.tmp` next to the target, syncs it, then renames it over
///   the target.
/// - Emits `task_file_write` logging events with duration and status.
///
/// # Errors
/// - `StorageError::Write` on any directory, write, sync or rename failure.
pub fn write_task_file(path: &Path, tasks: &[Task]) -> StorageResult<()> {
    let started_at = Instant::now();
    let body = format_records(tasks);

    match replace_atomically(path, body.as_bytes()) {
        Ok(()) => {
            debug!(
                "event=task_file_write module=storage status=ok duration_ms={} records={} bytes={}",
                started_at.elapsed().as_millis(),
                tasks.len(),
                body.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=task_file_write module=storage status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(StorageError::Write {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

fn replace_atomically(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path)?;
    let result = write_and_rename(&temp_path, path, data);
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_and_rename(temp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut temp_file = File::create(temp_path)?;
    temp_file.write_all(data)?;
    temp_file.sync_all()?;
    drop(temp_file);

    fs::rename(temp_path, path)
}

// Same directory as the target so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            ErrorKind::InvalidInput,
            format!("task file path `{}` has no file name", path.display()),
        )
    })?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(TEMP_SUFFIX);
    Ok(path.with_file_name(temp_name))
}
