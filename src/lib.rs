//! `underlay` - lyrics underlay distribution for music notation lines.
//!
//! Splits free-text lyrics into syllables and assigns each syllable to the
//! pitched cell it is sung on, skipping barlines and whitespace and giving a
//! melisma (notes under one slur) a single syllable at its first note.


// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod lilypond;
pub mod lyrics;
pub mod types;

pub use error::{Error, Result};
pub use lyrics::{distribute_lyrics, parse_lyrics};
pub use types::{Assignment, Cell, ElementKind, Line, SlurIndicator};
