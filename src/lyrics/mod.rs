//! Lyrics underlay: tokenizing lyric text and placing syllables under notes.
//!
//! Text flows one way: raw lyrics -> syllable tokens -> assignments against
//! the cells of one line. Everything here is pure and per-line, so lines can
//! be processed independently (see [`distributor::distribute_lines`]).

pub mod distributor;
pub mod spans;
pub mod tokenizer;

pub use distributor::{distribute_lines, distribute_lyrics, distribute_syllables, distribute_value};
pub use spans::{distribute_with_spans, extract_spans, MelismaSpan, UnterminatedPolicy};
pub use tokenizer::{is_continued, merge_syllables, parse_lyrics};
