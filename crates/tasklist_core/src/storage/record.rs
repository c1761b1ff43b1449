//! Line codec for the task file.
//!
//! Format: `<id>|<title>|<description>|<completed>`, one record per line.
//! Separators inside text fields are not escaped, so the format is lossy for
//! titles or descriptions containing `|`.

use super::{StorageError, StorageResult};
use crate::model::task::{Task, TaskId};

pub const FIELD_SEPARATOR: char = '|';
const FIELD_COUNT: usize = 4;

/// Result of decoding a whole file body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecords {
    /// Decoded tasks in file order.
    pub tasks: Vec<Task>,
    /// Lines skipped because they did not split into exactly four fields.
    pub skipped_lines: usize,
}

/// Decodes one line.
///
/// Returns `Ok(None)` for malformed lines (wrong field count, including blank
/// lines). `line_number` is 1-based and only used for error reporting.
///
/// # Errors
/// - `StorageError::InvalidId` when the id field is not an integer.
pub fn parse_record(line: &str, line_number: usize) -> StorageResult<Option<Task>> {
    // `split` keeps empty trailing fields, so `1|a||` still yields four.
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT {
        return Ok(None);
    }

    let id: TaskId = fields[0].parse().map_err(|_| StorageError::InvalidId {
        line: line_number,
        value: fields[0].to_string(),
    })?;

    let mut task = Task::new(id, fields[1], fields[2]);
    task.set_completed(fields[3].eq_ignore_ascii_case("true"));
    Ok(Some(task))
}

/// Decodes a whole file body, accepting `\n`, `\r\n` and bare `\r` line
/// endings.
///
/// # Errors
/// - Propagates the first `StorageError::InvalidId`; no partial result is
///   returned.
pub fn parse_records(content: &str) -> StorageResult<ParsedRecords> {
    let mut parsed = ParsedRecords::default();
    for (index, line) in split_lines(content).into_iter().enumerate() {
        match parse_record(line, index + 1)? {
            Some(task) => parsed.tasks.push(task),
            None => parsed.skipped_lines += 1,
        }
    }
    Ok(parsed)
}

/// Splits on `\n`, `\r\n` or a lone `\r`.
///
/// A terminator at the very end does not produce a trailing empty line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                lines.push(&rest[..end]);
                let terminator_len = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator_len..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Encodes one task as a line without the trailing newline.
pub fn format_record(task: &Task) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        task.id(),
        sanitize_field(task.title()),
        sanitize_field(task.description()),
        task.is_completed(),
        sep = FIELD_SEPARATOR
    )
}

/// Encodes all tasks, one newline-terminated line each.
pub fn format_records(tasks: &[Task]) -> String {
    let mut body = String::new();
    for task in tasks {
        body.push_str(&format_record(task));
        body.push('\n');
    }
    body
}

/// Replaces line breaks so a field cannot split its record.
pub fn sanitize_field(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::{format_record, parse_record, parse_records, sanitize_field, split_lines};
    use crate::model::task::Task;
    use crate::storage::StorageError;

    #[test]
    fn parse_record_keeps_empty_trailing_fields() {
        let task = parse_record("7|title||", 1)
            .expect("line should parse")
            .expect("four fields expected");
        assert_eq!(task.id(), 7);
        assert_eq!(task.description(), "");
        assert!(!task.is_completed());
    }

    #[test]
    fn parse_record_matches_true_case_insensitively() {
        let task = parse_record("1|a|b|TRUE", 1).unwrap().unwrap();
        assert!(task.is_completed());

        let task = parse_record("1|a|b|yes", 1).unwrap().unwrap();
        assert!(!task.is_completed());
    }

    #[test]
    fn parse_record_skips_wrong_field_count() {
        assert_eq!(parse_record("1|only two", 1).unwrap(), None);
        assert_eq!(parse_record("1|a|b|true|extra", 1).unwrap(), None);
        assert_eq!(parse_record("", 1).unwrap(), None);
    }

    #[test]
    fn parse_record_rejects_non_integer_id() {
        let err = parse_record("abc|a|b|false", 4).unwrap_err();
        assert!(matches!(err, StorageError::InvalidId { line: 4, ref value } if value == "abc"));
    }

    #[test]
    fn parse_records_accepts_crlf_and_counts_skips() {
        let parsed = parse_records("1|a|b|false\r\n\r\n2|c|d|true\r\n").unwrap();
        assert_eq!(parsed.tasks.len(), 2);
        assert_eq!(parsed.skipped_lines, 1);
        assert_eq!(parsed.tasks[1].description(), "d");
        assert!(parsed.tasks[1].is_completed());
    }

    #[test]
    fn parse_records_accepts_lone_carriage_returns() {
        let parsed = parse_records("1|a|b|false\r2|c|d|true\r").unwrap();
        assert_eq!(parsed.skipped_lines, 0);
        assert_eq!(parsed.tasks.len(), 2);
        assert_eq!(parsed.tasks[0].description(), "b");
        assert_eq!(parsed.tasks[1].id(), 2);
        assert!(parsed.tasks[1].is_completed());
    }

    #[test]
    fn split_lines_handles_mixed_terminators() {
        assert_eq!(
            split_lines("a\nb\r\nc\rd"),
            vec!["a", "b", "c", "d"]
        );
        assert_eq!(split_lines("a\r\r\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn format_record_flattens_newlines() {
        let task = Task::new(2, "two\nlines", "a\r\nb");
        assert_eq!(format_record(&task), "2|two lines|a  b|false");
        assert_eq!(sanitize_field("plain"), "plain");
    }
}
