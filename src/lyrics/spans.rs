//! Explicit melisma spans.
//!
//! Extracts `(start, end)` spans from the per-cell slur markers in a
//! validation pass, then distributes against those spans. With
//! [`UnterminatedPolicy::Extend`] the result matches
//! [`super::distribute_lyrics`] exactly; the other policies decide what an
//! unclosed slur means before any syllable is placed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tokenizer::parse_lyrics;
use crate::error::{Error, Result};
use crate::types::{Assignment, Cell, SlurIndicator};

/// A melisma over cells `start..=end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelismaSpan {
    /// Index of the slur start cell, the only cell in the span that takes a syllable.
    pub start: usize,
    /// Index of the last cell sung to the span's syllable (inclusive).
    pub end: usize,
}

impl MelismaSpan {
    /// Whether `cell_index` falls inside this span.
    pub const fn contains(&self, cell_index: usize) -> bool {
        self.start <= cell_index && cell_index <= self.end
    }
}

/// What to do with a slur start that is never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnterminatedPolicy {
    /// The melisma runs to the end of the line.
    #[default]
    Extend,
    /// The melisma closes on its own start cell.
    AutoClose,
    /// The line is rejected with [`Error::UnterminatedMelisma`].
    Reject,
}

impl UnterminatedPolicy {
    /// Returns the configuration name of this policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Extend => "extend",
            Self::AutoClose => "close",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for UnterminatedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnterminatedPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "extend" => Ok(Self::Extend),
            "close" | "auto-close" | "autoclose" => Ok(Self::AutoClose),
            "reject" => Ok(Self::Reject),
            other => Err(Error::config(
                format!("unknown unterminated-melisma policy `{other}`"),
                "Use `extend`, `close` or `reject`",
            )),
        }
    }
}

/// Extract melisma spans from per-cell slur markers.
///
/// Non-pitched cells never open or close a span. A slur start while a span
/// is open closes the open span on the preceding cell. A slur end with no
/// open span is left alone.
pub fn extract_spans(cells: &[Cell], policy: UnterminatedPolicy) -> Result<Vec<MelismaSpan>> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;

    for (index, cell) in cells.iter().enumerate() {
        if !cell.is_pitched() {
            continue;
        }

        match cell.slur_indicator {
            SlurIndicator::SlurStart => {
                if let Some(start) = open.replace(index) {
                    spans.push(MelismaSpan { start, end: index - 1 });
                }
            }
            SlurIndicator::SlurEnd => {
                if let Some(start) = open.take() {
                    spans.push(MelismaSpan { start, end: index });
                }
            }
            SlurIndicator::None => {}
        }
    }

    if let Some(start) = open {
        let end = match policy {
            UnterminatedPolicy::Extend => cells.len() - 1,
            UnterminatedPolicy::AutoClose => start,
            UnterminatedPolicy::Reject => return Err(Error::UnterminatedMelisma { start }),
        };
        tracing::warn!("Unterminated melisma at cell {start}, closing at cell {end} ({policy})");
        spans.push(MelismaSpan { start, end });
    }

    Ok(spans)
}

/// Distribute lyrics against pre-extracted melisma spans.
///
/// A pitched cell is eligible when it starts a span, or lies outside every
/// span and is not a stray slur end.
pub fn distribute_with_spans(
    lyrics: &str,
    cells: &[Cell],
    policy: UnterminatedPolicy,
) -> Result<Vec<Assignment>> {
    let spans = extract_spans(cells, policy)?;
    let mut queue = parse_lyrics(lyrics).into_iter();
    let mut pending = spans.iter().peekable();
    let mut assignments = Vec::new();

    for (cell_index, cell) in cells.iter().enumerate() {
        if !cell.is_pitched() {
            continue;
        }

        while pending.next_if(|span| span.end < cell_index).is_some() {}

        let eligible = match pending.peek() {
            Some(span) if span.contains(cell_index) => span.start == cell_index,
            _ => !cell.is_slur_end(),
        };
        if !eligible {
            continue;
        }

        let Some(syllable) = queue.next() else {
            break;
        };
        assignments.push(Assignment { cell_index, syllable });
    }

    Ok(assignments)
}
