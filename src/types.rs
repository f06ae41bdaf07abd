//! Core type definitions shared by the tokenizer, distributor and exporters.
//!
//! Cells arrive from the layout stage already classified; only the element
//! kind, the slur marker and the continuation flag are ever read here.

use serde::{Deserialize, Serialize};

/// Classification of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A note carrying a pitch; the only kind that can take a syllable.
    PitchedElement,
    /// A rhythmic element without pitch (dash, rest).
    UnpitchedElement,
    /// Bar separator.
    Barline,
    /// Space between beats.
    Whitespace,
    /// Breath mark.
    BreathMark,
    /// Free text or annotation.
    Text,
    /// Ornamental or decorative symbol.
    Symbol,
    /// Anything the layout stage could not classify.
    #[default]
    Unknown,
}

/// Per-cell melisma boundary marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlurIndicator {
    /// No slur boundary on this cell.
    #[default]
    None,
    /// A slur opens on this cell.
    SlurStart,
    /// A slur closes on this cell (inclusive).
    SlurEnd,
}

/// One rendered notation position in a line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Element classification.
    pub kind: ElementKind,
    /// Slur boundary marker.
    #[serde(default)]
    pub slur_indicator: SlurIndicator,
    /// Trailing half of a multi-character pitch (e.g. an accidental).
    #[serde(default)]
    pub continuation: bool,
    /// Rendered glyph, passed through untouched.
    #[serde(default)]
    pub glyph: String,
}

impl Cell {
    /// Create a cell of the given kind with no slur marker.
    pub const fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            slur_indicator: SlurIndicator::None,
            continuation: false,
            glyph: String::new(),
        }
    }

    /// A pitched cell with no slur marker.
    pub const fn pitched() -> Self {
        Self::new(ElementKind::PitchedElement)
    }

    /// A barline cell.
    pub const fn barline() -> Self {
        Self::new(ElementKind::Barline)
    }

    /// A whitespace cell.
    pub const fn whitespace() -> Self {
        Self::new(ElementKind::Whitespace)
    }

    /// Builder: set the slur marker.
    #[must_use]
    pub fn with_slur(mut self, slur_indicator: SlurIndicator) -> Self {
        self.slur_indicator = slur_indicator;
        self
    }

    /// Builder: mark as the continuation of the previous pitch.
    #[must_use]
    pub fn as_continuation(mut self) -> Self {
        self.continuation = true;
        self
    }

    /// Whether this cell counts as a pitch for lyric placement.
    pub const fn is_pitched(&self) -> bool {
        matches!(self.kind, ElementKind::PitchedElement) && !self.continuation
    }

    /// Whether a slur opens on this cell.
    pub const fn is_slur_start(&self) -> bool {
        matches!(self.slur_indicator, SlurIndicator::SlurStart)
    }

    /// Whether a slur closes on this cell.
    pub const fn is_slur_end(&self) -> bool {
        matches!(self.slur_indicator, SlurIndicator::SlurEnd)
    }
}

/// A syllable placed under one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Offset into the line's cell sequence.
    pub cell_index: usize,
    /// The syllable text, with its continuation hyphen if any.
    pub syllable: String,
}

impl Assignment {
    /// Create a new assignment.
    pub fn new(cell_index: usize, syllable: impl Into<String>) -> Self {
        Self { cell_index, syllable: syllable.into() }
    }
}

/// One notation line: its lyrics and its rendered cells.
///
/// Unlike [`Cell`], a line rejects unknown keys, so a misspelled `lyrics`
/// is an error rather than an empty line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Line {
    /// Free-text lyrics for the line.
    #[serde(default)]
    pub lyrics: String,
    /// Rendered cells in document order.
    #[serde(default)]
    pub cells: Vec<Cell>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_cell_deserializes_with_defaults() {
        let cell: Cell = serde_json::from_str(r#"{"kind":"pitched_element","x":12.5}"#).unwrap();
        assert_eq!(cell.kind, ElementKind::PitchedElement);
        assert_eq!(cell.slur_indicator, SlurIndicator::None);
        assert!(!cell.continuation);
        assert!(cell.glyph.is_empty());
    }

    #[test]
    fn test_cell_slur_markers_roundtrip_names() {
        let cell: Cell =
            serde_json::from_str(r#"{"kind":"pitched_element","slur_indicator":"slur_start"}"#)
                .unwrap();
        assert!(cell.is_slur_start());
        assert!(!cell.is_slur_end());
    }

    #[test]
    fn test_continuation_is_not_pitched() {
        assert!(Cell::pitched().is_pitched());
        assert!(!Cell::pitched().as_continuation().is_pitched());
        assert!(!Cell::barline().is_pitched());
        assert!(!Cell::whitespace().is_pitched());
    }

    #[test]
    fn test_line_rejects_unknown_keys_but_cells_do_not() {
        assert!(serde_json::from_str::<Line>(r#"{"lyric":"a b"}"#).is_err());
        let line: Line =
            serde_json::from_str(r#"{"lyrics":"a","cells":[{"kind":"barline","x":3}]}"#).unwrap();
        assert_eq!(line.cells, vec![Cell::barline()]);
    }

    #[test]
    fn test_line_serializes_assignment_shape() {
        let json = serde_json::to_string(&Assignment::new(3, "lo")).unwrap();
        assert_eq!(json, r#"{"cell_index":3,"syllable":"lo"}"#);
    }
}
