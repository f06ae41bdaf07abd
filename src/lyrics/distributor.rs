//! Distributes syllables to the pitched cells of a line.
//!
//! A single left-to-right scan with one bit of state: whether we are inside
//! a melisma. A slur start takes a syllable and opens the melisma; every
//! pitched cell after it, up to and including the slur end, is sung to that
//! same syllable and receives nothing.

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use super::tokenizer::parse_lyrics;
use crate::error::{Error, Result};
use crate::types::{Assignment, Cell, Line, SlurIndicator};

/// Distribute lyrics to the cells of one line, respecting melismas.
///
/// Surplus syllables or surplus eligible cells are left over silently.
///
/// # Arguments
/// * `lyrics` - Raw lyrics string
/// * `cells` - Cells of the line, in document order
pub fn distribute_lyrics(lyrics: &str, cells: &[Cell]) -> Vec<Assignment> {
    let syllables = parse_lyrics(lyrics);
    distribute_syllables(&syllables, cells)
}

/// Distribute an already tokenized syllable queue to the cells of one line.
pub fn distribute_syllables(syllables: &[String], cells: &[Cell]) -> Vec<Assignment> {
    let result = scan(syllables, cells);

    if result.ended_in_melisma {
        tracing::debug!("Line ended inside a melisma; later cells received no syllables");
    }
    tracing::debug!(
        "Placed {} of {} syllables across {} cells",
        result.assignments.len(),
        syllables.len(),
        cells.len()
    );

    result.assignments
}

/// Result of one marker scan.
struct Scan {
    assignments: Vec<Assignment>,
    /// The scan reached the last cell with a melisma still open.
    ended_in_melisma: bool,
}

fn scan(syllables: &[String], cells: &[Cell]) -> Scan {
    let mut assignments = Vec::with_capacity(syllables.len().min(cells.len()));
    let mut queue = syllables.iter();
    let mut in_melisma = false;

    for (cell_index, cell) in cells.iter().enumerate() {
        // Out of syllables: the rest of the line is never looked at
        if queue.as_slice().is_empty() {
            return Scan { assignments, ended_in_melisma: false };
        }

        if !cell.is_pitched() {
            continue;
        }

        match (cell.slur_indicator, in_melisma) {
            (SlurIndicator::SlurStart, _) => {
                if let Some(syllable) = queue.next() {
                    assignments.push(Assignment::new(cell_index, syllable.clone()));
                }
                in_melisma = true;
            }
            // Interior of a melisma: sung to the syllable already placed
            (SlurIndicator::None, true) => {}
            (SlurIndicator::SlurEnd, _) => in_melisma = false,
            (SlurIndicator::None, false) => {
                if let Some(syllable) = queue.next() {
                    assignments.push(Assignment::new(cell_index, syllable.clone()));
                }
            }
        }
    }

    Scan { assignments, ended_in_melisma: in_melisma }
}

/// Distribute lyrics to a dynamically typed cell sequence.
///
/// Fails fast with [`Error::InvalidArgument`] when `cells` is not an array,
/// or when one of its elements does not describe a cell.
pub fn distribute_value(lyrics: &str, cells: &Value) -> Result<Vec<Assignment>> {
    let Some(elements) = cells.as_array() else {
        return Err(Error::invalid_argument(
            "cells",
            format!("expected an array of cells, got {}", value_kind(cells)),
        ));
    };

    let cells = elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            Cell::deserialize(element).map_err(|e| {
                Error::invalid_argument("cells", format!("element {index} is not a cell: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(distribute_lyrics(lyrics, &cells))
}

/// Distribute every line independently, in parallel.
pub fn distribute_lines(lines: &[Line]) -> Vec<Vec<Assignment>> {
    lines
        .par_iter()
        .map(|line| distribute_lyrics(&line.lyrics, &line.cells))
        .collect()
}

/// Name of a JSON value's type, for error messages.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
