//! Line documents: loading notation lines and rendering their underlay.
//!
//! A document is either a single [`Line`] object or an array of them, as
//! produced by the layout stage.

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::lilypond::to_lyricmode;
use crate::lyrics::distributor::value_kind;
use crate::lyrics::{distribute_lines, distribute_with_spans, UnterminatedPolicy};
use crate::types::{Assignment, Cell, Line};

/// Parse a document from JSON text.
///
/// Malformed lines fail with [`Error::InvalidArgument`] naming the line,
/// and the cell when a cell is at fault.
pub fn parse_lines(json: &str) -> Result<Vec<Line>> {
    let document: Value = serde_json::from_str(json)?;
    match &document {
        Value::Array(lines) => lines
            .iter()
            .enumerate()
            .map(|(index, line)| decode_line(index, line))
            .collect(),
        Value::Object(_) => Ok(vec![decode_line(0, &document)?]),
        other => Err(Error::invalid_argument(
            "document",
            format!("expected a line object or an array of lines, got {}", value_kind(other)),
        )),
    }
}

/// Decode one line, pointing at the first undecodable cell if there is one.
fn decode_line(index: usize, value: &Value) -> Result<Line> {
    Line::deserialize(value).map_err(|e| {
        let bad_cell = value
            .get("cells")
            .and_then(Value::as_array)
            .and_then(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .find_map(|(i, cell)| Cell::deserialize(cell).err().map(|ce| (i, ce)))
            });
        let message = match bad_cell {
            Some((cell_index, cell_err)) => format!("line {index}, cell {cell_index}: {cell_err}"),
            None => format!("line {index}: {e}"),
        };
        Error::invalid_argument("document", message)
    })
}

/// Read a document from any reader (stdin in the CLI).
pub fn read_lines(mut reader: impl Read) -> Result<Vec<Line>> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_lines(&json)
}

/// Load a document from disk.
pub fn load_lines(path: &Path) -> Result<Vec<Line>> {
    let json = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
    let lines = parse_lines(&json)?;
    tracing::info!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Distribute every line under the given unterminated-melisma policy.
///
/// `Extend` uses the per-cell marker scan; the other policies go through
/// explicit span extraction so they can close or reject open slurs.
pub fn distribute_document(lines: &[Line], policy: UnterminatedPolicy) -> Result<Vec<Vec<Assignment>>> {
    if policy == UnterminatedPolicy::Extend {
        return Ok(distribute_lines(lines));
    }

    lines
        .par_iter()
        .map(|line| distribute_with_spans(&line.lyrics, &line.cells, policy))
        .collect()
}

/// Render per-line assignments in the requested format.
pub fn render(results: &[Vec<Assignment>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Lilypond => Ok(results
            .iter()
            .map(|assignments| to_lyricmode(assignments))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    const ONE_LINE: &str = r#"{
        "lyrics": "one two",
        "cells": [
            { "kind": "pitched_element", "slur_indicator": "slur_start" },
            { "kind": "pitched_element", "slur_indicator": "slur_end" },
            { "kind": "barline" },
            { "kind": "pitched_element" }
        ]
    }"#;

    #[test]
    fn test_parse_single_line() {
        let lines = parse_lines(ONE_LINE).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].cells.len(), 4);
    }

    #[test]
    fn test_parse_many_lines() {
        let json = format!("[{ONE_LINE}, {{\"lyrics\": \"la\"}}]");
        let lines = parse_lines(&json).unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].cells.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_lines("42").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { argument: "document", .. }));
        assert!(err.to_string().contains("a number"));
        assert!(matches!(parse_lines("{ not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_bad_cell_kind_names_line_and_cell() {
        let err = parse_lines(r#"{"lyrics":"a","cells":[{"kind":"pitched"}]}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 0, cell 0"), "{message}");
        assert!(message.contains("pitched"), "{message}");
    }

    #[test]
    fn test_bad_line_in_array_is_named_by_index() {
        let json = format!(r#"[{ONE_LINE}, {{"lyrics":"b","cells":[{{"kind":"barline"}}, 7]}}]"#);
        let err = parse_lines(&json).unwrap_err();
        assert!(err.to_string().contains("line 1, cell 1"), "{err}");
    }

    #[test]
    fn test_misspelled_line_key_is_rejected() {
        let err = parse_lines(r#"{"lyric":"a b"}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 0"), "{message}");
        assert!(message.contains("lyric"), "{message}");
    }

    #[test]
    fn test_read_failure_is_io_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
        }
        assert!(matches!(read_lines(Broken), Err(Error::Io { path: None, .. })));
    }

    #[test]
    fn test_load_lines_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONE_LINE.as_bytes()).unwrap();
        let lines = load_lines(file.path()).unwrap();
        assert_eq!(lines[0].lyrics, "one two");
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_lines(Path::new("/nonexistent/underlay_line.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("underlay_line.json"));
    }

    #[test]
    fn test_underlay_and_render_json() {
        let lines = parse_lines(ONE_LINE).unwrap();
        let results = distribute_document(&lines, UnterminatedPolicy::Extend).unwrap();
        let json = render(&results, OutputFormat::Json).unwrap();
        let back: Vec<Vec<Assignment>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![vec![Assignment::new(0, "one"), Assignment::new(3, "two")]]);
    }

    #[test]
    fn test_reject_policy_fails_on_open_slur() {
        let json = r#"{ "lyrics": "a b", "cells": [
            { "kind": "pitched_element", "slur_indicator": "slur_start" },
            { "kind": "pitched_element" }
        ]}"#;
        let lines = parse_lines(json).unwrap();
        assert!(matches!(
            distribute_document(&lines, UnterminatedPolicy::Reject),
            Err(Error::UnterminatedMelisma { start: 0 })
        ));
    }

    #[test]
    fn test_render_lilypond() {
        let results = vec![vec![Assignment::new(0, "hel-"), Assignment::new(2, "lo")]];
        let out = render(&results, OutputFormat::Lilypond).unwrap();
        assert!(out.contains("hel -- lo"));
    }
}
